use thiserror::Error;

use super::models::AuthFailure;

/// Failure to turn a backend payload into a canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The envelope held no record (empty `data`, `data: null`, or nothing at all).
    #[error("response contains no record")]
    NotFound,
    /// A record was present but lacks something the canonical shape requires.
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl NormalizeError {
    /// Attach the resource being looked up and convert into a [`CmsError`].
    #[must_use]
    pub fn for_resource(self, resource: impl Into<String>) -> CmsError {
        match self {
            Self::NotFound => CmsError::NotFound(resource.into()),
            Self::Malformed(reason) => CmsError::Malformed(format!("{}: {reason}", resource.into())),
        }
    }
}

/// Errors surfaced by [`super::CmsClient`].
#[derive(Debug, Error)]
pub enum CmsError {
    /// Transport failure or a non-2xx status from the content backend.
    #[error("content backend unavailable: {message}")]
    BackendUnavailable { status: Option<u16>, message: String },

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Login, registration or token check rejected by the backend.
    #[error("authentication failed: {0}")]
    Auth(AuthFailure),

    /// A 2xx response whose body could not be understood.
    #[error("unexpected response from content backend: {0}")]
    Malformed(String),
}

impl CmsError {
    /// HTTP status reported by the backend, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BackendUnavailable { status, .. } => *status,
            Self::Auth(failure) => Some(failure.status),
            Self::NotFound(_) | Self::Malformed(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for CmsError {
    fn from(err: reqwest::Error) -> Self {
        Self::BackendUnavailable {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
