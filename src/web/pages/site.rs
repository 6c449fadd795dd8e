//! Static pages: about and not-found.

use maud::{html, Markup};

use crate::components::{BaseLayout, Button};
use crate::config::Config;

/// Render the about page.
#[must_use]
pub fn render_about_page(config: &Config) -> Markup {
    let mailto = format!("mailto:{}", config.contact_email);

    let content = html! {
        header class="page-header" {
            h1 { "About " (config.site_name) }
            p class="lead" { "A home for thoughtful writing on the topics our community cares about." }
        }

        section {
            h2 { "Our Mission" }
            p {
                "We publish well-researched articles and practical guides, and we keep them "
                "free to read. Every piece is written and edited by people who know their subject."
            }
        }

        section {
            h2 { "Our Team" }
            p {
                "Our writers and editors come from engineering, design and journalism. "
                "New contributors are always welcome."
            }
        }

        section {
            h2 { "Get in Touch" }
            p {
                "Questions, corrections or pitches? Email us at "
                a href=(mailto) { (config.contact_email) }
                " or use the contact form."
            }
            (Button::outline("Contact Us").href("/contact"))
        }
    };

    BaseLayout::new("About", &config.site_name)
        .with_description("Who we are and what we publish.")
        .render(content)
}

/// Render the 404 page.
#[must_use]
pub fn render_not_found_page(config: &Config) -> Markup {
    let content = html! {
        section class="not-found" {
            h1 { "Page Not Found" }
            p { "The page you are looking for does not exist or has been moved." }
            (Button::primary("Return to Homepage").href("/"))
        }
    };

    BaseLayout::new("Page Not Found", &config.site_name).render(content)
}
