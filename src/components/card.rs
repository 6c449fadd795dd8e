//! Card components for article listings.

use maud::{html, Markup, Render};

use super::badge::CategoryBadge;
use super::button::Button;
use super::media::ImageViewer;
use super::metadata::{format_date, truncate_text};
use crate::cms::Article;

/// Longest description shown on a card.
const CARD_DESCRIPTION_LEN: usize = 160;

/// An article summary card.
///
/// # Example
///
/// ```ignore
/// use crate::components::card::ArticleCard;
///
/// let card = ArticleCard::new(&article, images.placeholder());
/// ```
#[derive(Debug, Clone)]
pub struct ArticleCard<'a> {
    pub article: &'a Article,
    /// Shown when the article has no cover.
    pub placeholder: &'a str,
}

impl<'a> ArticleCard<'a> {
    #[must_use]
    pub const fn new(article: &'a Article, placeholder: &'a str) -> Self {
        Self {
            article,
            placeholder,
        }
    }
}

impl Render for ArticleCard<'_> {
    fn render(&self) -> Markup {
        let article = self.article;
        let href = article.href();
        let cover = match &article.cover {
            Some(image) => ImageViewer::from_resolved(image),
            None => ImageViewer::new(self.placeholder),
        }
        .with_alt(&article.title)
        .with_class("article-card-cover");
        let author = article.author.as_ref().and_then(|a| a.name.as_deref());
        let read_more_label = format!("Read more about {}", article.title);

        html! {
            article class="article-card" {
                a href=(href) class="article-card-image" { (cover) }
                div class="article-card-body" {
                    @if let Some(category) = &article.category {
                        (CategoryBadge::new(category))
                    }
                    h3 {
                        a href=(href) { (article.title) }
                    }
                    @if !article.description.is_empty() {
                        p class="article-card-description" {
                            (truncate_text(&article.description, CARD_DESCRIPTION_LEN))
                        }
                    }
                    p class="meta" {
                        @if let Some(name) = author {
                            span class="author" { "By " (name) }
                        }
                        @if let Some(published) = &article.published_at {
                            time datetime=(published.to_rfc3339()) { (format_date(published)) }
                        }
                    }
                    (Button::link("Read more →").href(&href).aria_label(&read_more_label))
                }
            }
        }
    }
}

/// A grid of article cards, or an empty state when there are none.
#[derive(Debug, Clone)]
pub struct ArticleGrid<'a> {
    pub articles: &'a [Article],
    pub placeholder: &'a str,
}

impl<'a> ArticleGrid<'a> {
    #[must_use]
    pub const fn new(articles: &'a [Article], placeholder: &'a str) -> Self {
        Self {
            articles,
            placeholder,
        }
    }
}

impl Render for ArticleGrid<'_> {
    fn render(&self) -> Markup {
        if self.articles.is_empty() {
            return EmptyState::no_articles().render();
        }
        html! {
            div class="article-grid" {
                @for article in self.articles {
                    (ArticleCard::new(article, self.placeholder))
                }
            }
        }
    }
}

/// Placeholder shown in place of an empty listing.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

impl EmptyState<'static> {
    #[must_use]
    pub const fn no_articles() -> Self {
        Self {
            title: "No articles found",
            message: "Please check back later for new content.",
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="empty-state" {
                h3 { (self.title) }
                p { (self.message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{AuthorRef, CategoryRef, ResolvedImage};
    use chrono::{TimeZone, Utc};

    const PLACEHOLDER: &str = "/static/images/placeholder.svg";

    fn sample_article() -> Article {
        Article {
            id: 1,
            document_id: None,
            title: "Hello World".to_string(),
            description: "A first post".to_string(),
            slug: Some("hello-world".to_string()),
            published_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
            created_at: None,
            updated_at: None,
            cover: Some(ResolvedImage {
                url: "http://cms.test/uploads/cover.jpg".to_string(),
                alt: None,
                width: None,
                height: None,
            }),
            author: Some(AuthorRef {
                name: Some("Ada".to_string()),
                email: None,
            }),
            category: Some(CategoryRef {
                name: Some("News".to_string()),
                slug: Some("news".to_string()),
            }),
            blocks: Vec::new(),
        }
    }

    #[test]
    fn test_article_card_basic() {
        let article = sample_article();
        let html = ArticleCard::new(&article, PLACEHOLDER).render().into_string();

        assert!(html.contains("article-card"));
        assert!(html.contains("Hello World"));
        assert!(html.contains("href=\"/articles/hello-world\""));
        assert!(html.contains("http://cms.test/uploads/cover.jpg"));
        assert!(html.contains("By Ada"));
        assert!(html.contains("News"));
        assert!(html.contains("March 1, 2024"));
        assert!(html.contains("Read more"));
    }

    #[test]
    fn test_article_card_without_optionals() {
        let mut article = sample_article();
        article.cover = None;
        article.author = None;
        article.category = None;
        article.slug = None;
        article.published_at = None;
        article.description = String::new();
        let html = ArticleCard::new(&article, PLACEHOLDER).render().into_string();

        assert!(html.contains(PLACEHOLDER));
        assert!(html.contains("href=\"/articles/1\""));
        assert!(!html.contains("By "));
        assert!(!html.contains("badge-category"));
        assert!(!html.contains("<time"));
        assert!(!html.contains("article-card-description"));
    }

    #[test]
    fn test_article_grid() {
        let articles = vec![sample_article()];
        let html = ArticleGrid::new(&articles, PLACEHOLDER)
            .render()
            .into_string();
        assert!(html.contains("article-grid"));
        assert!(html.contains("article-card"));
    }

    #[test]
    fn test_article_grid_empty() {
        let html = ArticleGrid::new(&[], PLACEHOLDER).render().into_string();
        assert!(!html.contains("article-grid"));
        assert!(html.contains("No articles found"));
        assert!(html.contains("Please check back later for new content."));
    }
}
