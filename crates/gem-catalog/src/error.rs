//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog operations.
///
/// The query pipeline itself never fails: shape and field problems degrade to
/// defaults. These errors cover the edges where a caller hands in something
/// that cannot be interpreted at all.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Unknown sort field name.
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Unknown view mode name.
    #[error("Unknown view mode: {0}")]
    UnknownViewMode(String),

    /// Invalid numeric bound in filter criteria.
    #[error("Invalid bound for {field}: {value}")]
    InvalidBound { field: String, value: String },

    /// Catalog payload could not be parsed as JSON.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
