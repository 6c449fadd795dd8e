//! Diagnostic pages showing raw backend responses.
//!
//! Only mounted when `DEBUG_ROUTES` is enabled.

use maud::{html, Markup};

use crate::cms::{classify, RawResponse};
use crate::components::{Alert, BaseLayout, KeyValueTable};
use crate::config::Config;

/// One probe made by a diagnostic page: a label plus what came back.
#[derive(Debug)]
pub struct DebugProbe<'a> {
    pub label: &'a str,
    /// The response, or the transport error text.
    pub outcome: Result<&'a RawResponse, String>,
}

impl<'a> DebugProbe<'a> {
    #[must_use]
    pub const fn new(label: &'a str, outcome: Result<&'a RawResponse, String>) -> Self {
        Self { label, outcome }
    }
}

fn pretty_body(body: &Result<serde_json::Value, String>) -> String {
    match body {
        Ok(value) => serde_json::to_string_pretty(value).unwrap_or_else(|e| e.to_string()),
        Err(text) => text.clone(),
    }
}

fn envelope_kind(response: &RawResponse) -> &'static str {
    response.body.as_ref().map_or("unparsable", |v| classify(v).kind())
}

fn render_probe(probe: &DebugProbe<'_>, show_headers: bool) -> Markup {
    html! {
        section class="debug-probe" {
            h2 { (probe.label) }
            @match &probe.outcome {
                Ok(response) => {
                    (KeyValueTable::debug()
                        .row("URL", html! { code { (response.url) } })
                        .row("Status", response.status)
                        .row("Envelope", envelope_kind(response)))
                    @if show_headers {
                        h3 { "Headers" }
                        (response.headers.iter().fold(
                            KeyValueTable::debug(),
                            |table, (name, value)| table.row(name, value),
                        ))
                    }
                    h3 { "Body" }
                    pre class="debug-body" { (pretty_body(&response.body)) }
                }
                Err(error) => {
                    (Alert::error(error).with_title("Request failed"))
                }
            }
        }
    }
}

/// Render the article lookup comparison: direct id lookup vs filtered query.
#[must_use]
pub fn render_debug_article_page(
    config: &Config,
    id: &str,
    direct: &DebugProbe<'_>,
    filtered: &DebugProbe<'_>,
) -> Markup {
    let title = format!("Debug: article {id}");
    let content = html! {
        h1 { (title) }
        p class="meta" { "Raw responses for both lookup strategies." }
        (render_probe(direct, false))
        (render_probe(filtered, false))
    };

    BaseLayout::new(&title, &config.site_name).render(content)
}

/// Render the raw article collection response, headers included.
#[must_use]
pub fn render_debug_api_page(config: &Config, probe: &DebugProbe<'_>) -> Markup {
    let content = html! {
        h1 { "Debug: API" }
        (render_probe(probe, true))
    };

    BaseLayout::new("Debug: API", &config.site_name).render(content)
}
