//! Home page and the article index.

use maud::{html, Markup};

use crate::cms::Article;
use crate::components::{Alert, ArticleGrid, BaseLayout, Button, OpenGraphMetadata};
use crate::config::Config;

/// What a listing page shows: the articles it got, and why it got none.
#[derive(Debug, Clone, Copy)]
pub struct ListingParams<'a> {
    pub articles: &'a [Article],
    /// Backend-reported total, which may exceed `articles.len()`.
    pub total: u64,
    /// Set when the backend could not be reached; the grid is then empty.
    pub error: Option<&'a str>,
}

impl<'a> ListingParams<'a> {
    #[must_use]
    pub fn new(articles: &'a [Article], total: u64) -> Self {
        Self {
            articles,
            total,
            error: None,
        }
    }

    /// Listing that degraded after a backend failure.
    #[must_use]
    pub fn failed(error: &'a str) -> Self {
        Self {
            articles: &[],
            total: 0,
            error: Some(error),
        }
    }
}

/// Notice shown above an empty grid when loading failed.
fn load_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            (Alert::error(message).with_title("Error loading articles"))
        }
    }
}

/// Render the home page.
#[must_use]
pub fn render_home_page(config: &Config, params: &ListingParams<'_>) -> Markup {
    let description = format!("Welcome to {}, stories and articles from our writers.", config.site_name);
    let og = OpenGraphMetadata::new(&config.site_name, &description, "/")
        .with_site_name(&config.site_name);

    let content = html! {
        section class="hero" {
            h1 { "Welcome to " (config.site_name) }
            p class="lead" { "Discover stories, ideas and insights from our writers." }
            (Button::primary("Browse Articles").href("/articles"))
        }

        section class="latest-articles" {
            h2 {
                "Latest Articles"
                @if params.error.is_none() {
                    " "
                    span class="count" { "(" (params.articles.len()) ")" }
                }
            }
            (load_error(params.error))
            (ArticleGrid::new(params.articles, &config.placeholder_image))
        }
    };

    BaseLayout::new("Home", &config.site_name)
        .with_description(&description)
        .with_og_metadata(og)
        .render(content)
}

/// Render the article index.
#[must_use]
pub fn render_articles_page(config: &Config, params: &ListingParams<'_>) -> Markup {
    let noun = if params.total == 1 { "article" } else { "articles" };

    let content = html! {
        header class="page-header" {
            h1 { "All Articles" }
            @if params.error.is_none() {
                p class="meta" { "Found " (params.total) " " (noun) }
            }
        }
        (load_error(params.error))
        (ArticleGrid::new(params.articles, &config.placeholder_image))
    };

    BaseLayout::new("All Articles", &config.site_name)
        .with_description("Browse every article published on the site.")
        .render(content)
}
