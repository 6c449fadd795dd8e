//! Image display components.
//!
//! All sources are expected to be absolute URLs (or the placeholder path);
//! resolution happens when content is normalized.

use maud::{html, Markup, Render};

use crate::cms::ResolvedImage;

/// Alt text used when the backend supplies none.
pub const DEFAULT_ALT: &str = "Media image";

/// Lazily loaded `<img>`, sized when the backend reports dimensions.
#[derive(Debug, Clone)]
pub struct ImageViewer<'a> {
    pub src: &'a str,
    pub alt: Option<&'a str>,
    pub class: Option<&'a str>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl<'a> ImageViewer<'a> {
    /// A bare source with no metadata, e.g. the configured placeholder.
    #[must_use]
    pub const fn new(src: &'a str) -> Self {
        Self {
            src,
            alt: None,
            class: None,
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn from_resolved(image: &'a ResolvedImage) -> Self {
        Self {
            alt: image.alt.as_deref(),
            width: image.width,
            height: image.height,
            ..Self::new(&image.url)
        }
    }

    #[must_use]
    pub const fn with_alt(mut self, alt: &'a str) -> Self {
        self.alt = Some(alt);
        self
    }

    #[must_use]
    pub const fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }
}

impl Render for ImageViewer<'_> {
    fn render(&self) -> Markup {
        html! {
            img src=(self.src)
                alt=(self.alt.unwrap_or(DEFAULT_ALT))
                class=[self.class]
                width=[self.width]
                height=[self.height]
                loading="lazy";
        }
    }
}

/// Image with an optional caption, rendered as `<figure>`.
///
/// # Example
///
/// ```ignore
/// use crate::components::Figure;
///
/// html! {
///     (Figure::new(&image).caption(Some("Sunrise over the bay")))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Figure<'a> {
    pub image: &'a ResolvedImage,
    pub caption: Option<&'a str>,
    pub class: &'a str,
}

impl<'a> Figure<'a> {
    #[must_use]
    pub fn new(image: &'a ResolvedImage) -> Self {
        Self {
            image,
            caption: None,
            class: "block-media",
        }
    }

    /// Set the caption shown under the image.
    #[must_use]
    pub fn caption(mut self, caption: Option<&'a str>) -> Self {
        self.caption = caption.filter(|c| !c.trim().is_empty());
        self
    }

    /// Replace the figure's CSS class.
    #[must_use]
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = class;
        self
    }
}

impl Render for Figure<'_> {
    fn render(&self) -> Markup {
        html! {
            figure class=(self.class) {
                (ImageViewer::from_resolved(self.image))
                @if let Some(caption) = self.caption {
                    figcaption { (caption) }
                }
            }
        }
    }
}
