//! Contact form page.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout, Button, Field, Form};
use crate::config::Config;

/// State of the contact page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPageParams<'a> {
    /// The previous submission was accepted.
    pub success: bool,
    /// The previous submission failed.
    pub error: Option<&'a str>,
    /// Message to put back into the form after a failure.
    pub message: Option<&'a str>,
}

/// Render the contact page.
#[must_use]
pub fn render_contact_page(config: &Config, params: &ContactPageParams<'_>) -> Markup {
    let content = html! {
        div class="form-container" {
            h1 { "Contact Us" }
            p { "Send us a message and we will get back to you." }

            @if params.success {
                (Alert::success("Your message has been sent. We will get back to you soon.")
                    .with_title("Thank you!"))
            }
            @if let Some(error) = params.error {
                (Alert::error(error))
            }

            (Form::post("/contact", "contact-form", html! {
                (Field::textarea("message", "Message", 6)
                    .placeholder("Your message")
                    .value(params.message))
                (Button::primary("Send Message").submit())
            }))
        }
    };

    BaseLayout::new("Contact", &config.site_name)
        .with_description("Get in touch with the editorial team.")
        .render(content)
}
