//! Content backend client and the normalization core.
//!
//! [`CmsClient`] issues the REST calls; everything it receives is passed
//! through [`normalize`] before leaving this module.

pub mod envelope;
pub mod error;
pub mod image;
pub mod models;
pub mod normalize;

use anyhow::Context;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::CMS_USER_AGENT;

pub use envelope::{classify, Envelope};
pub use error::{CmsError, NormalizeError};
pub use image::{ImageRef, ImageResolver};
pub use models::{
    Article, ArticleCollection, AuthFailure, AuthSession, AuthorRef, CategoryRef, ContentBlock,
    Pagination, ResolvedImage, Role, User,
};
pub use normalize::{
    normalize_article, normalize_auth_session, normalize_block, normalize_collection,
    normalize_user, parse_auth_failure,
};

/// Longest slice of a response body written to logs.
const LOG_BODY_LIMIT: usize = 500;

/// Unprocessed response, used by the diagnostic pages.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Parsed JSON, or the parse error followed by the raw text.
    pub body: Result<Value, String>,
}

/// HTTP client for the content backend.
#[derive(Debug, Clone)]
pub struct CmsClient {
    client: Client,
    api_base: String,
    api_token: Option<String>,
    images: ImageResolver,
}

impl CmsClient {
    /// Create a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.cms_timeout)
            .user_agent(CMS_USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base: config.api_base(),
            api_token: config.cms_api_token.clone(),
            images: ImageResolver::from_config(config),
        })
    }

    /// Resolver used for every image this client normalizes.
    #[must_use]
    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    /// Fetch every article.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::BackendUnavailable`] on transport failure or a
    /// non-2xx status.
    pub async fn get_articles(&self) -> Result<ArticleCollection, CmsError> {
        let raw = self.get_content("/articles", &[("populate", "*")]).await?;
        normalize_collection(&raw, &self.images).map_err(|e| e.for_resource("articles"))
    }

    /// Fetch one article by numeric id through a filtered query.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::NotFound`] if no article has this id.
    pub async fn get_article_by_id(&self, id: i64) -> Result<Article, CmsError> {
        let id_param = id.to_string();
        let raw = self
            .get_content(
                "/articles",
                &[("filters[id][$eq]", id_param.as_str()), ("populate", "*")],
            )
            .await?;
        normalize_article(&raw, &self.images).map_err(|e| e.for_resource(format!("article {id}")))
    }

    /// Fetch one article by slug through a filtered query.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::NotFound`] if no article has this slug.
    pub async fn get_article_by_slug(&self, slug: &str) -> Result<Article, CmsError> {
        let raw = self
            .get_content(
                "/articles",
                &[("filters[slug][$eq]", slug), ("populate", "*")],
            )
            .await?;
        normalize_article(&raw, &self.images)
            .map_err(|e| e.for_resource(format!("article '{slug}'")))
    }

    /// Look an article up by URL key: slug first, then numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::NotFound`] if neither lookup finds the article.
    pub async fn find_article(&self, key: &str) -> Result<Article, CmsError> {
        match self.get_article_by_slug(key).await {
            Err(e) if e.is_not_found() => match key.parse::<i64>() {
                Ok(id) => self.get_article_by_id(id).await,
                Err(_) => Err(e),
            },
            other => other,
        }
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Auth`] with the backend's message when the
    /// credentials are rejected.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, CmsError> {
        let body = json!({ "identifier": identifier, "password": password });
        let raw = self.post_auth("/auth/local", &body).await?;
        normalize_auth_session(&raw).map_err(|e| e.for_resource("login response"))
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Auth`] with the backend's message when
    /// registration is rejected.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CmsError> {
        let body = json!({ "username": username, "email": email, "password": password });
        let raw = self.post_auth("/auth/local/register", &body).await?;
        normalize_auth_session(&raw).map_err(|e| e.for_resource("registration response"))
    }

    /// Fetch the profile belonging to a user token.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Auth`] if the token is rejected.
    pub async fn get_current_user(&self, token: &str) -> Result<User, CmsError> {
        let url = self.endpoint("/users/me");
        debug!(url = %url, "Fetching current user");
        let response = self
            .client
            .get(&url)
            .query(&[("populate", "*")])
            .bearer_auth(token)
            .send()
            .await?;
        let raw = auth_json(&url, response).await?;
        normalize_user(&raw).map_err(|e| e.for_resource("current user"))
    }

    /// Forward a contact-form message.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::BackendUnavailable`] if the backend does not
    /// accept the submission.
    pub async fn submit_contact(&self, message: &str) -> Result<(), CmsError> {
        let url = self.endpoint("/contacts");
        debug!(url = %url, "Submitting contact message");
        let response = self
            .authorized(self.client.post(&url))
            .json(&json!({ "data": { "message": message } }))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(unavailable(&url, status, &body))
    }

    /// Fetch an API path without interpreting the response.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::BackendUnavailable`] only on transport failure.
    pub async fn fetch_raw(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, CmsError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Fetching raw response");
        let response = self
            .authorized(self.client.get(&url))
            .query(query)
            .send()
            .await?;

        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).map_err(|e| format!("{e}\n\n{text}"));

        Ok(RawResponse {
            url: final_url,
            status,
            headers,
            body,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_content(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, CmsError> {
        let url = self.endpoint(path);
        debug!(url = %url, ?query, "Fetching from content backend");
        let response = self
            .authorized(self.client.get(&url))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(unavailable(&url, status, &body));
        }
        serde_json::from_str(&body).map_err(|e| CmsError::Malformed(format!("{url}: {e}")))
    }

    async fn post_auth(&self, path: &str, body: &Value) -> Result<Value, CmsError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Posting credentials");
        let response = self.client.post(&url).json(body).send().await?;
        auth_json(&url, response).await
    }
}

/// Read an auth-endpoint response: 4xx error envelopes become [`CmsError::Auth`].
async fn auth_json(url: &str, response: Response) -> Result<Value, CmsError> {
    let status = response.status();
    let body = response.text().await?;
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    if status.is_client_error() {
        if let Some(failure) = parsed
            .as_ref()
            .and_then(|raw| parse_auth_failure(raw, status.as_u16()))
        {
            warn!(url = %url, status = %status, message = %failure.message, "Backend rejected credentials");
            return Err(CmsError::Auth(failure));
        }
    }
    if !status.is_success() {
        return Err(unavailable(url, status, &body));
    }
    parsed.ok_or_else(|| CmsError::Malformed(format!("{url}: response is not JSON")))
}

fn unavailable(url: &str, status: StatusCode, body: &str) -> CmsError {
    let excerpt: String = body.chars().take(LOG_BODY_LIMIT).collect();
    warn!(url = %url, status = %status, body = %excerpt, "Content backend returned an error");

    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|raw| {
            raw.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    CmsError::BackendUnavailable {
        status: Some(status.as_u16()),
        message,
    }
}
