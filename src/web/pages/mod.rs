//! Maud-based page templates for the web UI.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod article;
pub mod auth;
pub mod contact;
pub mod debug;
pub mod home;
pub mod site;

pub use article::{render_article_page, NO_CONTENT_MESSAGE};
pub use auth::{render_login_page, render_profile_page, render_register_page, RegisterFormValues};
pub use contact::{render_contact_page, ContactPageParams};
pub use debug::{render_debug_api_page, render_debug_article_page, DebugProbe};
pub use home::{render_articles_page, render_home_page, ListingParams};
pub use site::{render_about_page, render_not_found_page};
