//! Maud building blocks shared by the page renderers and content blocks.
//!
//! Class names line up with `static/css/style.css`. Pages compose these
//! inside [`BaseLayout`]:
//!
//! ```ignore
//! let content = html! {
//!     (Alert::error(message).with_title("Error loading articles"))
//!     (ArticleGrid::new(&articles, &config.placeholder_image))
//! };
//! BaseLayout::new("Articles", &config.site_name).render(content)
//! ```

pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod carousel;
pub mod form;
pub mod layout;
pub mod media;
pub mod metadata;
pub mod table;

pub use alert::Alert;
pub use badge::{Badge, CategoryBadge, ConfirmationBadge};
pub use button::Button;
pub use card::{ArticleCard, ArticleGrid, EmptyState};
pub use carousel::Carousel;
pub use form::{Field, Form};
pub use layout::BaseLayout;
pub use media::{Figure, ImageViewer};
pub use metadata::{format_date, truncate_text, OpenGraphMetadata};
pub use table::KeyValueTable;
