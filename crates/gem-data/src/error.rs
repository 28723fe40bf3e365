//! Fetch error types.

use thiserror::Error;

/// Errors that can occur when loading catalog data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not reach the server.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Reading a local catalog file failed.
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl FetchError {
    /// The HTTP status, when the server answered with an error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether trying again later might succeed: timeouts, refused
    /// connections, rate limiting and 5xx answers.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::ConnectionError(_) => true,
            FetchError::HttpError { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::ConnectionError(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = FetchError::HttpError {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: maintenance");
        assert_eq!(err.status(), Some(503));
        assert_eq!(FetchError::Timeout.status(), None);
        assert!(err.is_transient());
    }

    #[test]
    fn test_from_json_error() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, FetchError::ParseError(_)));
    }
}
