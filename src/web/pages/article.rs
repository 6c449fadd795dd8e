//! Article detail page.

use maud::{html, Markup};

use crate::cms::Article;
use crate::components::{format_date, BaseLayout, CategoryBadge, Figure, OpenGraphMetadata};
use crate::config::Config;

/// Shown in place of the body when no block rendered.
pub const NO_CONTENT_MESSAGE: &str = "This article has no detailed content yet.";

/// Render an article with its already-dispatched block fragments.
#[must_use]
pub fn render_article_page(config: &Config, article: &Article, fragments: &[Markup]) -> Markup {
    let author = article.author.as_ref().and_then(|a| a.name.as_deref());
    let href = article.href();

    let og = OpenGraphMetadata::new(&article.title, &article.description, &href)
        .with_type("article")
        .with_site_name(&config.site_name)
        .with_image(article.cover.as_ref().map(|c| c.url.as_str()))
        .with_published_at(article.published_at);

    let content = html! {
        article class="article-detail" {
            p { a href="/articles" { "← Back to articles" } }

            header class="article-header" {
                @if let Some(category) = &article.category {
                    (CategoryBadge::new(category))
                }
                h1 { (article.title) }
                p class="meta" {
                    @if let Some(name) = author {
                        span class="author" { "By " (name) }
                    }
                    @if let Some(published) = &article.published_at {
                        time datetime=(published.to_rfc3339()) { (format_date(published)) }
                    }
                }
            }

            @if let Some(cover) = &article.cover {
                (Figure::new(cover).with_class("article-cover"))
            }

            @if !article.description.is_empty() {
                p class="lead" { (article.description) }
            }

            div class="article-body" {
                @if fragments.is_empty() {
                    p class="no-content" { (NO_CONTENT_MESSAGE) }
                } @else {
                    @for fragment in fragments {
                        (fragment)
                    }
                }
            }
        }
    };

    let layout = BaseLayout::new(&article.title, &config.site_name).with_og_metadata(og);
    if article.description.is_empty() {
        layout.render(content)
    } else {
        layout.with_description(&article.description).render(content)
    }
}
