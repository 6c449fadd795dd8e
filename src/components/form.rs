//! Form building blocks for the login, registration and contact pages.
//!
//! Every field these pages collect is mandatory, so controls always carry
//! `required`. The control id doubles as its `name`.

use maud::{html, Markup, Render};

/// A `method="post"` form.
#[derive(Debug)]
pub struct Form<'a> {
    pub action: &'a str,
    pub class: &'a str,
    pub body: Markup,
}

impl<'a> Form<'a> {
    #[must_use]
    pub const fn post(action: &'a str, class: &'a str, body: Markup) -> Self {
        Self {
            action,
            class,
            body,
        }
    }
}

impl Render for Form<'_> {
    fn render(&self) -> Markup {
        html! {
            form action=(self.action) method="post" class=(self.class) {
                (self.body)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Input(&'static str),
    TextArea { rows: u32 },
}

/// A labelled form control wrapped in `.form-group`.
///
/// ```ignore
/// Field::email("email", "Email").value(previous).autocomplete("email");
/// ```
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub name: &'a str,
    pub label: &'a str,
    control: Control,
    value: Option<&'a str>,
    placeholder: Option<&'a str>,
    autocomplete: Option<&'a str>,
    minlength: Option<u32>,
    help: Option<&'a str>,
}

impl<'a> Field<'a> {
    const fn with_control(name: &'a str, label: &'a str, control: Control) -> Self {
        Self {
            name,
            label,
            control,
            value: None,
            placeholder: None,
            autocomplete: None,
            minlength: None,
            help: None,
        }
    }

    #[must_use]
    pub const fn text(name: &'a str, label: &'a str) -> Self {
        Self::with_control(name, label, Control::Input("text"))
    }

    #[must_use]
    pub const fn email(name: &'a str, label: &'a str) -> Self {
        Self::with_control(name, label, Control::Input("email"))
    }

    /// Password inputs never echo a value back.
    #[must_use]
    pub const fn password(name: &'a str, label: &'a str) -> Self {
        Self::with_control(name, label, Control::Input("password"))
    }

    #[must_use]
    pub const fn textarea(name: &'a str, label: &'a str, rows: u32) -> Self {
        Self::with_control(name, label, Control::TextArea { rows })
    }

    /// Pre-fill with what the visitor submitted last time, if anything.
    #[must_use]
    pub const fn value(mut self, value: Option<&'a str>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub const fn autocomplete(mut self, token: &'a str) -> Self {
        self.autocomplete = Some(token);
        self
    }

    #[must_use]
    pub const fn minlength(mut self, minlength: u32) -> Self {
        self.minlength = Some(minlength);
        self
    }

    #[must_use]
    pub const fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    fn control(&self) -> Markup {
        match self.control {
            Control::Input(kind) => {
                let value = if kind == "password" { None } else { self.value };
                html! {
                    input type=(kind)
                        id=(self.name)
                        name=(self.name)
                        value=[value]
                        placeholder=[self.placeholder]
                        autocomplete=[self.autocomplete]
                        minlength=[self.minlength]
                        required;
                }
            }
            Control::TextArea { rows } => html! {
                textarea id=(self.name)
                    name=(self.name)
                    rows=(rows)
                    placeholder=[self.placeholder]
                    required
                { (self.value.unwrap_or_default()) }
            },
        }
    }
}

impl Render for Field<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="form-group" {
                label for=(self.name) { (self.label) }
                (self.control())
                @if let Some(help) = self.help {
                    small { (help) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_wraps_body() {
        let html = Form::post("/login", "auth-form", html! { "fields" })
            .render()
            .into_string();
        assert_eq!(
            html,
            r#"<form action="/login" method="post" class="auth-form">fields</form>"#
        );
    }

    #[test]
    fn email_field_echoes_previous_value() {
        let html = Field::email("email", "Email")
            .value(Some("reader@example.com"))
            .autocomplete("email")
            .render()
            .into_string();
        assert!(html.contains(r#"<label for="email">Email</label>"#));
        assert!(html.contains(r#"type="email" id="email" name="email""#));
        assert!(html.contains(r#"value="reader@example.com""#));
        assert!(html.contains(" required"));
    }

    #[test]
    fn password_field_drops_value() {
        let html = Field::password("password", "Password")
            .value(Some("hunter22"))
            .minlength(6)
            .help("At least 6 characters.")
            .render()
            .into_string();
        assert!(!html.contains("hunter22"));
        assert!(html.contains(r#"minlength="6""#));
        assert!(html.contains("<small>At least 6 characters.</small>"));
    }

    #[test]
    fn textarea_escapes_echoed_message() {
        let html = Field::textarea("message", "Message", 6)
            .value(Some("<b>hi</b>"))
            .render()
            .into_string();
        assert!(html.contains(r#"rows="6""#));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;</textarea>"));
    }
}
