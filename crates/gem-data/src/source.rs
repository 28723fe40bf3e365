//! Catalog sources.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::FetchClient;
use crate::config::CatalogConfig;
use crate::FetchError;

/// Somewhere raw catalog and tag JSON can be fetched from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the raw stone payload.
    async fn fetch_catalog(&self) -> Result<Value, FetchError>;

    /// Fetch the raw tag payload.
    async fn fetch_tags(&self) -> Result<Value, FetchError>;

    /// Upper bound on the whole tag fetch. `None` waits as long as the
    /// fetch itself does.
    fn tags_deadline(&self) -> Option<Duration> {
        None
    }

    /// Short human description, e.g. the URL.
    fn describe(&self) -> String;
}

/// The catalog HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: FetchClient,
    stones_path: String,
    tags_path: String,
    tags_deadline: Option<Duration>,
}

impl HttpCatalogSource {
    pub fn new(
        client: FetchClient,
        stones_path: impl Into<String>,
        tags_path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            stones_path: stones_path.into(),
            tags_path: tags_path.into(),
            tags_deadline: None,
        }
    }

    /// Give up on tags after `deadline` so they never hold up the stones.
    pub fn with_tags_deadline(mut self, deadline: Duration) -> Self {
        self.tags_deadline = Some(deadline);
        self
    }

    /// Build a source from endpoint configuration.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let mut client = FetchClient::new(config.timeout())?
            .with_base_url(&config.base_url)
            .with_retry(config.retry_policy());
        if let Some(token) = config.token() {
            client = client.with_bearer_token(token);
        }
        Ok(Self::new(client, &config.stones_path, &config.tags_path)
            .with_tags_deadline(config.tags_timeout()))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<Value, FetchError> {
        self.client.get_json(&self.stones_path).await
    }

    async fn fetch_tags(&self) -> Result<Value, FetchError> {
        self.client.get_json(&self.tags_path).await
    }

    fn tags_deadline(&self) -> Option<Duration> {
        self.tags_deadline
    }

    fn describe(&self) -> String {
        self.client.url(&self.stones_path)
    }
}

/// JSON files on disk, e.g. a saved API response.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    stones: PathBuf,
    tags: Option<PathBuf>,
}

impl FileCatalogSource {
    pub fn new(stones: impl Into<PathBuf>) -> Self {
        Self {
            stones: stones.into(),
            tags: None,
        }
    }

    /// Also read tags from `tags`. Without it the tag list is empty.
    pub fn with_tags(mut self, tags: impl Into<PathBuf>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

async fn read_json(path: &Path) -> Result<Value, FetchError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> Result<Value, FetchError> {
        read_json(&self.stones).await
    }

    async fn fetch_tags(&self) -> Result<Value, FetchError> {
        match &self.tags {
            Some(path) => read_json(path).await,
            None => Ok(Value::Array(Vec::new())),
        }
    }

    fn describe(&self) -> String {
        self.stones.display().to_string()
    }
}
