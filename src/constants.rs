//! Shared constants used across the application.

/// User agent sent with every request to the content backend.
pub const CMS_USER_AGENT: &str = concat!("article-blog/", env!("CARGO_PKG_VERSION"));

/// Path prefix of the backend's REST API.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Image substituted when a reference carries no usable URL.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Title used for articles that arrive without one.
pub const UNTITLED: &str = "Untitled";
