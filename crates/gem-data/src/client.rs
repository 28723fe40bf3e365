//! HTTP client with base URL, default headers and retries.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::response::Response;
use crate::retry::RetryPolicy;
use crate::FetchError;

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    retry: RetryPolicy,
}

impl FetchClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gem-data/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: None,
            default_headers: HashMap::new(),
            retry: RetryPolicy::default(),
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Send a bearer token with every request.
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        self.with_default_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve `url` against the base URL. Absolute URLs are kept.
    pub fn url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                if url.is_empty() || url.starts_with('/') {
                    format!("{}{}", base.trim_end_matches('/'), url)
                } else {
                    format!("{}/{}", base.trim_end_matches('/'), url)
                }
            }
            _ => url.to_string(),
        }
    }

    /// Send one GET request. Non-2xx answers become errors.
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let full_url = self.url(url);
        let parsed = reqwest::Url::parse(&full_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", full_url, e)))?;

        let mut request = self.http.get(parsed).header("Accept", "application/json");
        for (key, value) in &self.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        Response::read(response).await?.error_for_status()
    }

    /// GET and parse JSON, retrying transient failures per the retry policy.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut attempt = 0;
        loop {
            match self.get(url).await.and_then(|r| r.json()) {
                Ok(value) => return Ok(value),
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    let delay = self.retry.delay(attempt);
                    tracing::warn!(
                        url,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
