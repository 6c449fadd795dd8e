//! Page metadata: Open Graph / Twitter Card tags and display helpers.

use chrono::{DateTime, Utc};
use maud::{html, Markup};

/// Open Graph metadata for social media previews.
///
/// Generates both Open Graph and Twitter Card meta tags.
#[derive(Debug, Clone)]
pub struct OpenGraphMetadata {
    /// Page title (og:title)
    pub title: String,
    /// Page description (og:description)
    pub description: String,
    /// Page URL (og:url)
    pub url: String,
    /// Open Graph type (og:type) - e.g., "website", "article"
    pub og_type: String,
    /// Image URL (og:image)
    pub image: Option<String>,
    /// Site name (og:site_name)
    pub site_name: String,
    /// Publication time for `article:published_time`
    pub published_at: Option<DateTime<Utc>>,
}

impl OpenGraphMetadata {
    /// Create a new metadata builder.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            og_type: "website".to_string(),
            image: None,
            site_name: String::new(),
            published_at: None,
        }
    }

    /// Set the Open Graph type.
    #[must_use]
    pub fn with_type(mut self, og_type: impl Into<String>) -> Self {
        self.og_type = og_type.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<impl Into<String>>) -> Self {
        self.image = image.map(Into::into);
        self
    }

    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    #[must_use]
    pub fn with_published_at(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Render the metadata tags.
    #[must_use]
    pub fn render(&self) -> Markup {
        let description = truncate_text(&self.description, 200);
        let twitter_card = if self.image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        };

        html! {
            meta property="og:title" content=(self.title);
            meta property="og:description" content=(description);
            meta property="og:url" content=(self.url);
            meta property="og:type" content=(self.og_type);
            @if !self.site_name.is_empty() {
                meta property="og:site_name" content=(self.site_name);
            }
            @if let Some(ref image_url) = self.image {
                meta property="og:image" content=(image_url);
                meta property="og:image:alt" content=(self.title);
            }
            @if let Some(published) = self.published_at {
                meta property="article:published_time" content=(published.to_rfc3339());
            }

            meta name="twitter:card" content=(twitter_card);
            meta name="twitter:title" content=(self.title);
            meta name="twitter:description" content=(description);
            @if let Some(ref image_url) = self.image {
                meta name="twitter:image" content=(image_url);
            }
        }
    }
}

/// Truncate text to `max_len` characters, ending with an ellipsis.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let mut truncated = text
            .chars()
            .take(max_len.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Human-readable date, e.g. "March 1, 2024".
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}
