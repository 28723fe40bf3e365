//! Catalog fetching for the gem browser.
//!
//! This crate provides:
//! - `FetchClient` - reqwest client with base URL, default headers and retry
//! - `CatalogSource` - where raw stones and tags come from (HTTP or files)
//! - `load_catalog` / `refresh` - concurrent stone + tag fetch into an `Inventory`
//! - `RetryPolicy` - exponential backoff for transient failures
//!
//! # Example
//!
//! ```rust,ignore
//! use gem_data::{load_catalog, CatalogConfig, HttpCatalogSource};
//!
//! let source = HttpCatalogSource::from_config(&CatalogConfig::new("https://api.example.com"))?;
//! let payload = load_catalog(&source).await?;
//! println!("{} stones", payload.stones.len());
//! ```

mod client;
mod config;
mod error;
mod loader;
mod response;
mod retry;
mod source;

pub use client::FetchClient;
pub use config::CatalogConfig;
pub use error::FetchError;
pub use loader::{load_catalog, refresh};
pub use response::Response;
pub use retry::{Backoff, RetryPolicy};
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        load_catalog, refresh, CatalogConfig, CatalogSource, FetchClient, FetchError,
        FileCatalogSource, HttpCatalogSource,
    };
}
