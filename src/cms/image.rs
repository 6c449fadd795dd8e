//! Image URL resolution.
//!
//! Uploaded media arrive as a record with a canonical `url` and an optional
//! `formats` map of resized renditions. URLs are usually relative to the
//! backend origin.

use serde_json::{Map, Value};
use url::Url;

use super::models::ResolvedImage;
use crate::config::Config;

/// One candidate URL with its intrinsic size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSource {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Resized renditions generated by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFormats {
    pub thumbnail: Option<ImageSource>,
    pub small: Option<ImageSource>,
    pub medium: Option<ImageSource>,
    pub large: Option<ImageSource>,
}

/// An unresolved image reference as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alternative_text: Option<String>,
    pub formats: ImageFormats,
}

impl ImageRef {
    /// Read an image reference from a flattened media record.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let formats = record.get("formats").and_then(Value::as_object);
        let format = |name: &str| formats.and_then(|f| f.get(name)).and_then(source_of);

        Self {
            url: non_empty_str(record.get("url")),
            width: dimension(record.get("width")),
            height: dimension(record.get("height")),
            alternative_text: non_empty_str(record.get("alternativeText")),
            formats: ImageFormats {
                thumbnail: format("thumbnail"),
                small: format("small"),
                medium: format("medium"),
                large: format("large"),
            },
        }
    }

    /// Candidates in preference order: large, medium, small, thumbnail, then the direct url.
    fn candidates(&self) -> impl Iterator<Item = ImageSource> + '_ {
        let direct = self.url.clone().map(|url| ImageSource {
            url,
            width: self.width,
            height: self.height,
        });
        [
            self.formats.large.clone(),
            self.formats.medium.clone(),
            self.formats.small.clone(),
            self.formats.thumbnail.clone(),
            direct,
        ]
        .into_iter()
        .flatten()
        .filter(|source| !source.url.trim().is_empty())
    }
}

/// Whether a flattened record looks like an uploaded media file.
#[must_use]
pub fn is_media_record(record: &Map<String, Value>) -> bool {
    matches!(record.get("url"), Some(Value::String(_)))
        || matches!(record.get("formats"), Some(Value::Object(_)))
}

/// Turns image references into absolute URLs against the backend origin.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    origin: String,
    placeholder: String,
}

impl ImageResolver {
    /// Create a resolver for the given backend origin and placeholder path.
    #[must_use]
    pub fn new(origin: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            placeholder: placeholder.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cms_origin(), config.placeholder_image.clone())
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Best-effort absolute URL for an image, or the placeholder path.
    #[must_use]
    pub fn resolve_url(&self, image: &ImageRef) -> String {
        image
            .candidates()
            .next()
            .map_or_else(|| self.placeholder.clone(), |source| self.absolutize(&source.url))
    }

    /// Resolve an image reference into the shape renderers consume.
    #[must_use]
    pub fn resolve(&self, image: &ImageRef) -> ResolvedImage {
        match image.candidates().next() {
            Some(source) => ResolvedImage {
                url: self.absolutize(&source.url),
                alt: image.alternative_text.clone(),
                width: source.width,
                height: source.height,
            },
            None => ResolvedImage {
                url: self.placeholder.clone(),
                alt: image.alternative_text.clone(),
                width: None,
                height: None,
            },
        }
    }

    /// Prefix a backend-relative path with the origin; absolute URLs pass through.
    #[must_use]
    pub fn absolutize(&self, path: &str) -> String {
        let path = path.trim();
        if let Ok(url) = Url::parse(path) {
            if matches!(url.scheme(), "http" | "https") {
                return path.to_string();
            }
        }
        if let Some(rest) = path.strip_prefix("//") {
            let scheme = self.origin.split("://").next().unwrap_or("https");
            return format!("{scheme}://{rest}");
        }
        if path.starts_with('/') {
            format!("{}{path}", self.origin)
        } else {
            format!("{}/{path}", self.origin)
        }
    }
}

fn source_of(value: &Value) -> Option<ImageSource> {
    let obj = value.as_object()?;
    Some(ImageSource {
        url: non_empty_str(obj.get("url"))?,
        width: dimension(obj.get("width")),
        height: dimension(obj.get("height")),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn dimension(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}
