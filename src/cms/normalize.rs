//! Content normalizer: raw backend JSON in, canonical records out.
//!
//! All functions here are pure. Image references are resolved while
//! normalizing so renderers only ever see absolute URLs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use super::envelope::{classify, flatten_record, unwrap_relation, Envelope, Relation};
use super::error::NormalizeError;
use super::image::{is_media_record, ImageRef, ImageResolver};
use super::models::{
    Article, ArticleCollection, AuthFailure, AuthSession, AuthorRef, CategoryRef, ContentBlock,
    Pagination, ResolvedImage, Role, User,
};
use crate::constants::UNTITLED;

/// Field names that carry a block's discriminator, checked in order.
const DISCRIMINATOR_FIELDS: [&str; 2] = ["__component", "type"];

/// Normalize a single article from any recognised envelope.
///
/// # Errors
///
/// Returns [`NormalizeError::NotFound`] when the envelope carries no record
/// (including an empty filtered collection) and [`NormalizeError::Malformed`]
/// when the record has no usable id.
pub fn normalize_article(raw: &Value, images: &ImageResolver) -> Result<Article, NormalizeError> {
    let record = single_record(raw)?;
    article_from_record(&flatten_record(record), images)
}

/// Normalize a collection response.
///
/// Items that cannot be normalized are skipped with a warning.
///
/// # Errors
///
/// Returns [`NormalizeError::Malformed`] if the payload is not a collection.
pub fn normalize_collection(
    raw: &Value,
    images: &ImageResolver,
) -> Result<ArticleCollection, NormalizeError> {
    let Envelope::Collection { items, meta } = classify(raw) else {
        return Err(NormalizeError::Malformed(format!(
            "expected a collection, got a {} envelope",
            classify(raw).kind()
        )));
    };

    let mut articles = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(record) = item.as_object() else {
            warn!(index, "Skipping non-object item in article collection");
            continue;
        };
        match article_from_record(&flatten_record(record), images) {
            Ok(article) => articles.push(article),
            Err(e) => warn!(index, error = %e, "Skipping article that failed to normalize"),
        }
    }

    let pagination = meta
        .and_then(|m| m.get("pagination"))
        .and_then(pagination_from)
        .unwrap_or_else(|| Pagination::single_page(articles.len()));

    Ok(ArticleCollection {
        articles,
        pagination,
    })
}

/// Normalize a user profile from any recognised envelope.
///
/// # Errors
///
/// Returns [`NormalizeError::NotFound`] when no record is present and
/// [`NormalizeError::Malformed`] when the record has no usable id.
pub fn normalize_user(raw: &Value) -> Result<User, NormalizeError> {
    let record = single_record(raw)?;
    user_from_record(&flatten_record(record))
}

/// Normalize a `{ jwt, user }` login or registration response.
///
/// # Errors
///
/// Returns [`NormalizeError::Malformed`] if the token or user is missing.
pub fn normalize_auth_session(raw: &Value) -> Result<AuthSession, NormalizeError> {
    let jwt = raw
        .get("jwt")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NormalizeError::Malformed("auth response has no jwt".to_string()))?;
    let user = raw
        .get("user")
        .ok_or_else(|| NormalizeError::Malformed("auth response has no user".to_string()))
        .and_then(normalize_user)
        .map_err(|e| match e {
            NormalizeError::NotFound => {
                NormalizeError::Malformed("auth response has an empty user".to_string())
            }
            other => other,
        })?;

    Ok(AuthSession {
        jwt: jwt.to_string(),
        user,
    })
}

/// Read an `{ error: { status, name, message } }` envelope.
///
/// `fallback_status` is the HTTP status of the response, used when the
/// envelope does not repeat it.
#[must_use]
pub fn parse_auth_failure(raw: &Value, fallback_status: u16) -> Option<AuthFailure> {
    let error = raw.get("error")?.as_object()?;
    let status = error
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(fallback_status);
    let name = string_field(error, "name").unwrap_or_else(|| "ApplicationError".to_string());
    let message = string_field(error, "message").unwrap_or_else(|| name.clone());

    Some(AuthFailure {
        status,
        name,
        message,
    })
}

fn single_record(raw: &Value) -> Result<&Map<String, Value>, NormalizeError> {
    match classify(raw) {
        Envelope::Collection { items, .. } => match items.first() {
            Some(Value::Object(record)) => Ok(record),
            Some(_) => Err(NormalizeError::Malformed(
                "collection item is not an object".to_string(),
            )),
            None => Err(NormalizeError::NotFound),
        },
        Envelope::Single(record) | Envelope::Bare(record) => Ok(record),
        Envelope::Empty => Err(NormalizeError::NotFound),
    }
}

fn article_from_record(
    fields: &Map<String, Value>,
    images: &ImageResolver,
) -> Result<Article, NormalizeError> {
    let id = id_field(fields)
        .ok_or_else(|| NormalizeError::Malformed("article has no numeric id".to_string()))?;

    let cover = fields.get("cover").and_then(|value| match unwrap_relation(value) {
        Relation::One(record) => Some(images.resolve(&ImageRef::from_record(&record))),
        Relation::Many(records) => records
            .first()
            .map(|record| images.resolve(&ImageRef::from_record(record))),
        Relation::Absent => None,
    });

    let author = one_relation(fields.get("author")).map(|record| AuthorRef {
        name: string_field(&record, "name"),
        email: string_field(&record, "email"),
    });

    let category = one_relation(fields.get("category")).map(|record| CategoryRef {
        name: string_field(&record, "name"),
        slug: string_field(&record, "slug"),
    });

    let blocks = fields
        .get("blocks")
        .and_then(Value::as_array)
        .map(|raw_blocks| {
            raw_blocks
                .iter()
                .map(|block| normalize_block(block, images))
                .collect()
        })
        .unwrap_or_default();

    Ok(Article {
        id,
        document_id: string_field(fields, "documentId"),
        title: string_field(fields, "title").unwrap_or_else(|| UNTITLED.to_string()),
        description: fields
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        slug: string_field(fields, "slug"),
        published_at: timestamp_field(fields, "publishedAt"),
        created_at: timestamp_field(fields, "createdAt"),
        updated_at: timestamp_field(fields, "updatedAt"),
        cover,
        author,
        category,
        blocks,
    })
}

/// Normalize one dynamic-zone entry.
///
/// Non-object entries become a block with no discriminator so the
/// dispatcher reports them instead of them vanishing silently.
#[must_use]
pub fn normalize_block(raw: &Value, images: &ImageResolver) -> ContentBlock {
    let Some(record) = raw.as_object() else {
        return ContentBlock::default();
    };
    let record = flatten_record(record);

    let component = DISCRIMINATOR_FIELDS
        .iter()
        .find_map(|key| string_field(&record, key));

    let mut fields = Map::new();
    let mut media = BTreeMap::new();
    for (key, value) in record {
        if DISCRIMINATOR_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match media_images(&value, images) {
            Some(resolved) => {
                media.insert(key, resolved);
            }
            None => {
                fields.insert(key, value);
            }
        }
    }

    ContentBlock {
        component,
        fields,
        media,
    }
}

/// Resolve a media-shaped value (single file or list of files).
///
/// A list counts as media once any element looks like an upload; elements
/// without a usable URL resolve to the placeholder.
fn media_images(value: &Value, images: &ImageResolver) -> Option<Vec<ResolvedImage>> {
    match unwrap_relation(value) {
        Relation::One(record) if is_media_record(&record) => {
            Some(vec![images.resolve(&ImageRef::from_record(&record))])
        }
        Relation::Many(records) if records.iter().any(is_media_record) => {
            Some(
                records
                    .iter()
                    .map(|record| images.resolve(&ImageRef::from_record(record)))
                    .collect(),
            )
        }
        _ => None,
    }
}

fn user_from_record(fields: &Map<String, Value>) -> Result<User, NormalizeError> {
    let id = id_field(fields)
        .ok_or_else(|| NormalizeError::Malformed("user has no numeric id".to_string()))?;

    let role = one_relation(fields.get("role")).and_then(|record| {
        Some(Role {
            id: id_field(&record),
            name: string_field(&record, "name")?,
            description: string_field(&record, "description"),
            kind: string_field(&record, "type"),
        })
    });

    Ok(User {
        id,
        username: string_field(fields, "username").unwrap_or_default(),
        email: string_field(fields, "email").unwrap_or_default(),
        provider: string_field(fields, "provider"),
        confirmed: bool_field(fields, "confirmed"),
        blocked: bool_field(fields, "blocked"),
        created_at: timestamp_field(fields, "createdAt"),
        updated_at: timestamp_field(fields, "updatedAt"),
        role,
    })
}

fn pagination_from(value: &Value) -> Option<Pagination> {
    let obj = value.as_object()?;
    let counter = |name: &str| obj.get(name).and_then(Value::as_u64);
    Some(Pagination {
        page: counter("page").unwrap_or(1),
        page_size: counter("pageSize")?,
        page_count: counter("pageCount").unwrap_or(0),
        total: counter("total")?,
    })
}

fn one_relation(value: Option<&Value>) -> Option<Map<String, Value>> {
    match unwrap_relation(value?) {
        Relation::One(record) => Some(record),
        Relation::Many(records) => records.into_iter().next(),
        Relation::Absent => None,
    }
}

fn id_field(fields: &Map<String, Value>) -> Option<i64> {
    match fields.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bool_field(fields: &Map<String, Value>, name: &str) -> bool {
    fields.get(name).and_then(Value::as_bool).unwrap_or(false)
}

fn timestamp_field(fields: &Map<String, Value>, name: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(name)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> ImageResolver {
        ImageResolver::new("http://cms.test", "/static/images/placeholder.svg")
    }

    fn flat_article() -> Value {
        json!({
            "id": 1,
            "documentId": "abc123",
            "title": "Hello",
            "description": "World",
            "slug": "hello",
            "publishedAt": "2024-03-01T10:00:00.000Z",
            "cover": {
                "id": 9,
                "url": "/uploads/cover.jpg",
                "alternativeText": "Cover",
                "formats": { "thumbnail": { "url": "/uploads/thumb_cover.jpg" } }
            },
            "author": { "id": 2, "name": "Ada", "email": "ada@example.com" },
            "category": { "id": 3, "name": "News", "slug": "news" },
            "blocks": [
                { "__component": "shared.rich-text", "id": 1, "body": "<p>x</p>" },
                { "__component": "shared.media", "id": 2, "file": { "id": 9, "url": "/uploads/m.jpg" } }
            ]
        })
    }

    fn nested_article() -> Value {
        json!({
            "id": 1,
            "attributes": {
                "documentId": "abc123",
                "title": "Hello",
                "description": "World",
                "slug": "hello",
                "publishedAt": "2024-03-01T10:00:00.000Z",
                "cover": { "data": { "id": 9, "attributes": {
                    "url": "/uploads/cover.jpg",
                    "alternativeText": "Cover",
                    "formats": { "thumbnail": { "url": "/uploads/thumb_cover.jpg" } }
                } } },
                "author": { "data": { "id": 2, "attributes": { "name": "Ada", "email": "ada@example.com" } } },
                "category": { "data": { "id": 3, "attributes": { "name": "News", "slug": "news" } } },
                "blocks": [
                    { "__component": "shared.rich-text", "id": 1, "body": "<p>x</p>" },
                    { "__component": "shared.media", "id": 2, "file": { "data": { "id": 9, "attributes": { "url": "/uploads/m.jpg" } } } }
                ]
            }
        })
    }

    #[test]
    fn test_empty_filtered_collection_is_not_found() {
        let raw = json!({ "data": [], "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 0, "total": 0 } } });
        assert_eq!(
            normalize_article(&raw, &resolver()),
            Err(NormalizeError::NotFound)
        );
        assert_eq!(
            normalize_article(&json!({ "data": null }), &resolver()),
            Err(NormalizeError::NotFound)
        );
        assert_eq!(
            normalize_article(&json!({}), &resolver()),
            Err(NormalizeError::NotFound)
        );
    }

    #[test]
    fn test_nested_and_flat_are_identical() {
        let images = resolver();
        let wrapped_flat = json!({ "data": [flat_article()] });
        let wrapped_nested = json!({ "data": [nested_article()] });

        let a = normalize_article(&wrapped_flat, &images).unwrap();
        let b = normalize_article(&wrapped_nested, &images).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_all_envelopes_produce_same_article() {
        let images = resolver();
        let bare = normalize_article(&flat_article(), &images).unwrap();
        let single = normalize_article(&json!({ "data": flat_article() }), &images).unwrap();
        let single_nested =
            normalize_article(&json!({ "data": nested_article() }), &images).unwrap();
        assert_eq!(bare, single);
        assert_eq!(bare, single_nested);
    }

    #[test]
    fn test_article_fields() {
        let article = normalize_article(&flat_article(), &resolver()).unwrap();
        assert_eq!(article.id, 1);
        assert_eq!(article.document_id.as_deref(), Some("abc123"));
        assert_eq!(article.slug.as_deref(), Some("hello"));
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );

        let cover = article.cover.unwrap();
        assert_eq!(cover.url, "http://cms.test/uploads/thumb_cover.jpg");
        assert_eq!(cover.alt.as_deref(), Some("Cover"));

        assert_eq!(article.author.unwrap().name.as_deref(), Some("Ada"));
        assert_eq!(article.category.unwrap().slug.as_deref(), Some("news"));

        assert_eq!(article.blocks.len(), 2);
        assert_eq!(
            article.blocks[1].image("file").map(|i| i.url.as_str()),
            Some("http://cms.test/uploads/m.jpg")
        );
    }

    #[test]
    fn test_missing_optionals_are_absent() {
        let raw = json!({
            "id": 5,
            "title": "",
            "cover": { "data": null },
            "author": null
        });
        let article = normalize_article(&raw, &resolver()).unwrap();
        assert_eq!(article.title, UNTITLED);
        assert_eq!(article.description, "");
        assert!(article.slug.is_none());
        assert!(article.published_at.is_none());
        assert!(article.cover.is_none());
        assert!(article.author.is_none());
        assert!(article.category.is_none());
        assert!(article.blocks.is_empty());
        assert_eq!(article.lookup_key(), "5");
    }

    #[test]
    fn test_cover_without_urls_resolves_to_placeholder() {
        let raw = json!({ "id": 5, "cover": { "id": 1, "formats": {} } });
        let article = normalize_article(&raw, &resolver()).unwrap();
        assert_eq!(article.cover.unwrap().url, "/static/images/placeholder.svg");
    }

    #[test]
    fn test_article_without_id_is_malformed() {
        let raw = json!({ "data": { "title": "No id" } });
        assert!(matches!(
            normalize_article(&raw, &resolver()),
            Err(NormalizeError::Malformed(_))
        ));
    }

    #[test]
    fn test_block_discriminator_fallback() {
        let raw = json!({
            "id": 1,
            "blocks": [
                { "type": "shared.quote", "quote": "Q" },
                { "__component": "", "type": "shared.quote", "quote": "Q" },
                { "__component": "shared.rich-text", "type": "paragraph" },
                { "quote": "no type" },
                "not an object"
            ]
        });
        let article = normalize_article(&raw, &resolver()).unwrap();
        let components: Vec<_> = article
            .blocks
            .iter()
            .map(|b| b.component.as_deref())
            .collect();
        assert_eq!(
            components,
            vec![
                Some("shared.quote"),
                Some("shared.quote"),
                Some("shared.rich-text"),
                None,
                None
            ]
        );
        assert!(!article.blocks[0].fields.contains_key("type"));
    }

    #[test]
    fn test_block_media_list() {
        let raw = json!({
            "id": 1,
            "blocks": [{
                "__component": "shared.slider",
                "files": { "data": [
                    { "id": 1, "attributes": { "url": "/uploads/1.jpg", "alternativeText": "one" } },
                    { "id": 2, "attributes": { "url": "https://cdn.test/2.jpg" } }
                ] }
            }]
        });
        let article = normalize_article(&raw, &resolver()).unwrap();
        let files = article.blocks[0].images("files");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].url, "http://cms.test/uploads/1.jpg");
        assert_eq!(files[0].alt.as_deref(), Some("one"));
        assert_eq!(files[1].url, "https://cdn.test/2.jpg");
    }

    #[test]
    fn test_block_media_list_keeps_pending_uploads() {
        let raw = json!({
            "id": 1,
            "blocks": [{
                "__component": "shared.slider",
                "files": { "data": [
                    { "id": 1, "attributes": { "url": "/uploads/a.jpg" } },
                    { "id": 2, "attributes": { "alternativeText": "pending upload" } }
                ] }
            }]
        });
        let article = normalize_article(&raw, &resolver()).unwrap();
        let block = &article.blocks[0];
        assert!(!block.fields.contains_key("files"));

        let files = block.images("files");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].url, "http://cms.test/uploads/a.jpg");
        assert_eq!(files[1].url, resolver().placeholder());
        assert_eq!(files[1].alt.as_deref(), Some("pending upload"));
    }

    #[test]
    fn test_collection_with_pagination() {
        let raw = json!({
            "data": [flat_article(), { "title": "no id" }, nested_article()],
            "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 1, "total": 3 } }
        });
        let collection = normalize_collection(&raw, &resolver()).unwrap();
        assert_eq!(collection.articles.len(), 2);
        assert_eq!(collection.pagination.total, 3);
        assert_eq!(collection.pagination.page_size, 25);
    }

    #[test]
    fn test_collection_without_meta() {
        let raw = json!({ "data": [flat_article()] });
        let collection = normalize_collection(&raw, &resolver()).unwrap();
        assert_eq!(collection.pagination, Pagination::single_page(1));
    }

    #[test]
    fn test_collection_rejects_single() {
        let raw = json!({ "data": flat_article() });
        assert!(normalize_collection(&raw, &resolver()).is_err());
    }

    #[test]
    fn test_normalize_user_nested() {
        let raw = json!({ "data": { "id": 5, "attributes": { "username": "bob", "email": "b@x.com" } } });
        let user = normalize_user(&raw).unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(user.username, "bob");
        assert_eq!(user.email, "b@x.com");
        assert!(user.provider.is_none());
        assert!(!user.confirmed);
        assert!(user.role.is_none());
    }

    #[test]
    fn test_normalize_user_flat_matches_nested() {
        let nested = json!({ "data": { "id": 5, "attributes": {
            "username": "bob", "email": "b@x.com", "provider": "local", "confirmed": true,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "role": { "data": { "id": 1, "attributes": { "name": "Authenticated", "type": "authenticated" } } }
        } } });
        let flat = json!({
            "id": 5, "username": "bob", "email": "b@x.com", "provider": "local", "confirmed": true,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "role": { "id": 1, "name": "Authenticated", "type": "authenticated" }
        });
        let a = normalize_user(&nested).unwrap();
        let b = normalize_user(&flat).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.role.unwrap().kind.as_deref(), Some("authenticated"));
    }

    #[test]
    fn test_auth_session() {
        let raw = json!({ "jwt": "token.abc", "user": { "id": 3, "username": "u", "email": "u@x.com" } });
        let session = normalize_auth_session(&raw).unwrap();
        assert_eq!(session.jwt, "token.abc");
        assert_eq!(session.user.id, 3);

        assert!(normalize_auth_session(&json!({ "user": { "id": 3 } })).is_err());
        assert!(normalize_auth_session(&json!({ "jwt": "t", "user": {} })).is_err());
    }

    #[test]
    fn test_parse_auth_failure() {
        let raw = json!({
            "data": null,
            "error": { "status": 400, "name": "ValidationError", "message": "Invalid identifier or password", "details": {} }
        });
        let failure = parse_auth_failure(&raw, 500).unwrap();
        assert_eq!(failure.status, 400);
        assert_eq!(failure.name, "ValidationError");
        assert_eq!(failure.message, "Invalid identifier or password");

        let failure = parse_auth_failure(&json!({ "error": { "name": "ForbiddenError" } }), 403).unwrap();
        assert_eq!(failure.status, 403);
        assert_eq!(failure.message, "ForbiddenError");

        assert!(parse_auth_failure(&json!({ "data": null }), 400).is_none());
    }
}
