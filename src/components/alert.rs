//! Inline notices shown above forms and listings.

use maud::{html, Markup, Render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Warning,
}

impl AlertVariant {
    const fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Errors are announced immediately; the rest politely.
    const fn role(self) -> &'static str {
        match self {
            Self::Error => "alert",
            Self::Success | Self::Warning => "status",
        }
    }
}

/// A one-line notice with an optional bold lead-in.
///
/// ```ignore
/// Alert::error(message).with_title("Error loading articles");
/// ```
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub title: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    const fn of(variant: AlertVariant, message: &'a str) -> Self {
        Self {
            variant,
            title: None,
            message,
        }
    }

    #[must_use]
    pub const fn success(message: &'a str) -> Self {
        Self::of(AlertVariant::Success, message)
    }

    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::of(AlertVariant::Error, message)
    }

    #[must_use]
    pub const fn warning(message: &'a str) -> Self {
        Self::of(AlertVariant::Warning, message)
    }

    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            div class={ "alert alert-" (self.variant.name()) } role=(self.variant.role()) {
                @if let Some(title) = self.title {
                    strong { (title) }
                    " "
                }
                (self.message)
            }
        }
    }
}
