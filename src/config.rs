use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{DEFAULT_API_PREFIX, DEFAULT_PLACEHOLDER_IMAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Content backend
    pub cms_url: String,
    pub cms_api_prefix: String,
    pub cms_api_token: Option<String>,
    pub cms_timeout: Duration,

    // Rendering
    pub placeholder_image: String,
    pub site_name: String,
    pub contact_email: String,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub debug_routes: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Content backend
            cms_url: env_or_default("CMS_URL", "http://localhost:1337"),
            cms_api_prefix: env_or_default("CMS_API_PREFIX", DEFAULT_API_PREFIX),
            cms_api_token: optional_env("CMS_API_TOKEN"),
            cms_timeout: Duration::from_secs(parse_env_u64("CMS_TIMEOUT_SECS", 15)?),

            // Rendering
            placeholder_image: env_or_default("PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE),
            site_name: env_or_default("SITE_NAME", "ArticleBlog"),
            contact_email: env_or_default("CONTACT_EMAIL", "contact@articleblog.com"),

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 3000)?,
            debug_routes: parse_env_bool("DEBUG_ROUTES", false)?,
        })
    }

    /// Configuration with fixed values, pointing at a local backend.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            cms_url: "http://localhost:1337".to_string(),
            cms_api_prefix: DEFAULT_API_PREFIX.to_string(),
            cms_api_token: None,
            cms_timeout: Duration::from_secs(5),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            site_name: "ArticleBlog".to_string(),
            contact_email: "contact@articleblog.com".to_string(),
            web_host: "127.0.0.1".to_string(),
            web_port: 3000,
            debug_routes: false,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.cms_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => {
                return Err(ConfigError::InvalidValue {
                    name: "CMS_URL".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    name: "CMS_URL".to_string(),
                    message: e.to_string(),
                });
            }
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SITE_NAME".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.cms_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "CMS_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Backend origin without a trailing slash.
    #[must_use]
    pub fn cms_origin(&self) -> &str {
        self.cms_url.trim_end_matches('/')
    }

    /// Base URL of the REST API, e.g. `http://localhost:1337/api`.
    #[must_use]
    pub fn api_base(&self) -> String {
        let prefix = self.cms_api_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.cms_origin().to_string()
        } else {
            format!("{}/{prefix}", self.cms_origin())
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}
