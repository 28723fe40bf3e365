//! Catalog endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;
use crate::FetchError;

/// Where and how to fetch the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// API root, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Path of the stone list, appended to `base_url`.
    pub stones_path: String,
    /// Path of the tag list, appended to `base_url`.
    pub tags_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Limit on the whole tag fetch, retries included.
    pub tags_timeout_secs: u64,
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    /// Optional bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stones_path: "/stones".to_string(),
            tags_path: "/tags".to_string(),
            timeout_secs: 15,
            tags_timeout_secs: 5,
            max_retries: 1,
            api_token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl CatalogConfig {
    /// Create a config for the given API root with default paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// The catalog load never waits longer than this for tags.
    pub fn tags_timeout(&self) -> Duration {
        Duration::from_secs(self.tags_timeout_secs.max(1))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }

    /// The bearer token, ignoring an empty one.
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Check that the base URL parses as an http(s) URL.
    pub fn validate(&self) -> Result<(), FetchError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(FetchError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.base_url, other
            ))),
        }
    }
}
