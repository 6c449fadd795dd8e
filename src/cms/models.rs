//! Canonical records produced by the content normalizer.
//!
//! Every record here is a request-scoped, read-only projection of backend
//! state. Optional relations are `None` when the backend did not send them;
//! pages omit those parts instead of guessing a default.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// An image reference resolved to a single absolute URL (or the placeholder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Author relation of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Category relation of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// One entry of an article's dynamic zone.
///
/// The block keeps its discriminator and its own fields opaque; renderers
/// pick out what they need. Media-shaped fields have already been resolved
/// to absolute URLs and live in `media` instead of `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentBlock {
    pub component: Option<String>,
    pub fields: Map<String, Value>,
    pub media: BTreeMap<String, Vec<ResolvedImage>>,
}

impl ContentBlock {
    /// Non-empty string field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// First resolved image of a media field.
    #[must_use]
    pub fn image(&self, name: &str) -> Option<&ResolvedImage> {
        self.images(name).first()
    }

    /// All resolved images of a media field, empty when absent.
    #[must_use]
    pub fn images(&self, name: &str) -> &[ResolvedImage] {
        self.media.get(name).map_or(&[], Vec::as_slice)
    }
}

/// The canonical article shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: i64,
    pub document_id: Option<String>,
    pub title: String,
    pub description: String,
    pub slug: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cover: Option<ResolvedImage>,
    pub author: Option<AuthorRef>,
    pub category: Option<CategoryRef>,
    pub blocks: Vec<ContentBlock>,
}

impl Article {
    /// Key used in article URLs: the slug, or the numeric id when there is none.
    #[must_use]
    pub fn lookup_key(&self) -> String {
        self.slug.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Path of the article's detail page.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/articles/{}", urlencoding::encode(&self.lookup_key()))
    }
}

/// Pagination counters exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub total: u64,
}

impl Pagination {
    /// Counters for a single page holding `len` items.
    #[must_use]
    pub fn single_page(len: usize) -> Self {
        let len = len as u64;
        Self {
            page: 1,
            page_size: len,
            page_count: u64::from(len > 0),
            total: len,
        }
    }
}

/// A list of articles and the backend's pagination counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCollection {
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}

impl ArticleCollection {
    /// An empty collection, used when a listing degrades after a backend failure.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            articles: Vec::new(),
            pagination: Pagination::single_page(0),
        }
    }
}

/// Role attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
}

/// The canonical (flat) user shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub provider: Option<String>,
    pub confirmed: bool,
    pub blocked: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub role: Option<Role>,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub jwt: String,
    pub user: User,
}

/// A login or registration rejected by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFailure {
    pub status: u16,
    pub name: String,
    pub message: String,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.message, self.status, self.name)
    }
}
