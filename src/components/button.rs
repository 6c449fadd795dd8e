//! Buttons and button-styled links.

use maud::{html, Markup, Render};

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    /// Bare text link with an arrow, as used by article cards.
    Link,
}

impl ButtonVariant {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Outline => "btn outline",
            Self::Link => "btn-link",
        }
    }
}

/// What happens when the button is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action<'a> {
    /// Plain `<button type="button">`, driven by scripts.
    None,
    /// Submits the enclosing form.
    Submit,
    /// Navigates; rendered as `<a>`.
    Navigate(&'a str),
}

/// A button or a link that looks like one.
///
/// ```ignore
/// Button::primary("Login").submit();
/// Button::outline("Contact Us").href("/contact");
/// ```
#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    action: Action<'a>,
    aria_label: Option<&'a str>,
}

impl<'a> Button<'a> {
    const fn with_variant(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            action: Action::None,
            aria_label: None,
        }
    }

    #[must_use]
    pub const fn primary(label: &'a str) -> Self {
        Self::with_variant(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub const fn outline(label: &'a str) -> Self {
        Self::with_variant(label, ButtonVariant::Outline)
    }

    #[must_use]
    pub const fn link(label: &'a str) -> Self {
        Self::with_variant(label, ButtonVariant::Link)
    }

    #[must_use]
    pub const fn href(mut self, href: &'a str) -> Self {
        self.action = Action::Navigate(href);
        self
    }

    #[must_use]
    pub const fn submit(mut self) -> Self {
        self.action = Action::Submit;
        self
    }

    /// Accessible name when the visible label is ambiguous out of context.
    #[must_use]
    pub const fn aria_label(mut self, label: &'a str) -> Self {
        self.aria_label = Some(label);
        self
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let class = self.variant.class();
        match self.action {
            Action::Navigate(href) => html! {
                a class=(class) href=(href) aria-label=[self.aria_label] { (self.label) }
            },
            Action::Submit | Action::None => html! {
                button
                    class=(class)
                    type=(if self.action == Action::Submit { "submit" } else { "button" })
                    aria-label=[self.aria_label]
                { (self.label) }
            },
        }
    }
}
