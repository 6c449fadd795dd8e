//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, navigation, and footer.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::metadata::OpenGraphMetadata;

/// Theme initialization script run in `<head>` before the body renders.
const THEME_INIT_SCRIPT: &str = r#"(function() {
    var theme = localStorage.getItem('theme');
    if (theme) {
        document.documentElement.setAttribute('data-theme', theme);
    } else if (window.matchMedia('(prefers-color-scheme: dark)').matches) {
        document.documentElement.setAttribute('data-theme', 'dark');
    }
})();"#;

/// Primary navigation entries, in display order.
const NAV_LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/articles", "Articles"),
    ("/about", "About"),
    ("/contact", "Contact"),
    ("/login", "Login"),
];

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "All Articles" } };
/// let page = BaseLayout::new("All Articles", &config.site_name)
///     .with_description("Browse every article")
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    site_name: &'a str,
    description: Option<&'a str>,
    og_metadata: Option<OpenGraphMetadata>,
    signed_in: bool,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and site name.
    #[must_use]
    pub fn new(title: &'a str, site_name: &'a str) -> Self {
        Self {
            title,
            site_name,
            description: None,
            og_metadata: None,
            signed_in: false,
        }
    }

    /// Set the `<meta name="description">` content.
    #[must_use]
    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the Open Graph metadata for social media previews.
    #[must_use]
    pub fn with_og_metadata(mut self, metadata: OpenGraphMetadata) -> Self {
        self.og_metadata = Some(metadata);
        self
    }

    /// Swap the Login entry for Logout.
    #[must_use]
    pub fn signed_in(mut self, signed_in: bool) -> Self {
        self.signed_in = signed_in;
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" data-theme="light" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="light dark";
                    title { (self.title) " - " (self.site_name) }
                    @if let Some(description) = self.description {
                        meta name="description" content=(description);
                    }

                    @if let Some(ref og) = self.og_metadata {
                        (og.render())
                    }

                    link rel="stylesheet" href="/static/css/style.css";
                    script { (PreEscaped(THEME_INIT_SCRIPT)) }
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (self.render_footer())
                    script src="/static/js/theme.js" {}
                    script src="/static/js/carousel.js" {}
                }
            }
        }
    }

    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li {
                            a href="/" {
                                strong class="site-logo" { (self.site_name) }
                            }
                        }
                    }
                    ul {
                        @for (href, label) in NAV_LINKS {
                            @if href == "/login" && self.signed_in {
                                li { a href="/logout" { "Logout" } }
                            } @else {
                                li { a href=(href) { (label) } }
                            }
                        }
                        li {
                            button
                                id="theme-toggle"
                                class="theme-toggle"
                                title="Toggle dark mode"
                                aria-label="Toggle dark mode" { "🌓" }
                        }
                    }
                }
            }
        }
    }

    fn render_footer(&self) -> Markup {
        html! {
            footer class="container" {
                small {
                    (self.site_name)
                    " | "
                    a href="/about" { "About" }
                    " | "
                    a href="/contact" { "Contact" }
                }
            }
        }
    }
}
