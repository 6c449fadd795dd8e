//! Badge components for article metadata.

use maud::{html, Markup, Render};

use crate::cms::CategoryRef;

/// A pill label; `modifier` selects the colour (`badge-success`, ...).
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    pub label: &'a str,
    pub modifier: &'a str,
}

impl<'a> Badge<'a> {
    #[must_use]
    pub const fn new(label: &'a str, modifier: &'a str) -> Self {
        Self { label, modifier }
    }
}

impl Render for Badge<'_> {
    fn render(&self) -> Markup {
        html! {
            span class={ "badge " (self.modifier) } { (self.label) }
        }
    }
}

/// Category label shown on cards and detail pages.
///
/// Renders nothing when the category has no name.
#[derive(Debug, Clone, Copy)]
pub struct CategoryBadge<'a> {
    pub category: &'a CategoryRef,
}

impl<'a> CategoryBadge<'a> {
    #[must_use]
    pub const fn new(category: &'a CategoryRef) -> Self {
        Self { category }
    }
}

impl Render for CategoryBadge<'_> {
    fn render(&self) -> Markup {
        let Some(name) = self.category.name.as_deref() else {
            return html! {};
        };
        html! {
            span class="badge badge-category" data-category=[self.category.slug.as_deref()] {
                (name)
            }
        }
    }
}

/// Confirmed / not confirmed account indicator.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationBadge {
    pub confirmed: bool,
}

impl ConfirmationBadge {
    #[must_use]
    pub const fn new(confirmed: bool) -> Self {
        Self { confirmed }
    }
}

impl Render for ConfirmationBadge {
    fn render(&self) -> Markup {
        if self.confirmed {
            Badge::new("Confirmed", "badge-success").render()
        } else {
            Badge::new("Not Confirmed", "badge-warning").render()
        }
    }
}
