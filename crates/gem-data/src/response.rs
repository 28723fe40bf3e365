//! Reading catalog API responses.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::FetchError;

/// Longest error text carried into a [`FetchError::HttpError`].
const MAX_ERROR_TEXT: usize = 200;

/// A catalog API response, body fully read.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// Read a reqwest response to completion.
    pub async fn read(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, content_type, body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// An HTML body (a login page or proxy error served with 200) is reported
    /// as such instead of as a JSON syntax error.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        if self.is_html() {
            return Err(FetchError::ParseError(
                "expected JSON, got an HTML page".to_string(),
            ));
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/html"))
    }

    /// Turn a non-2xx answer into an error carrying the server's message.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::HttpError {
            status: self.status,
            message: self.error_text(),
        })
    }

    /// The `message` or `error` field of a JSON error body, else the raw body.
    fn error_text(&self) -> String {
        let from_json = serde_json::from_slice::<Value>(&self.body)
            .ok()
            .and_then(|v| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
            });
        let text = from_json
            .unwrap_or_else(|| String::from_utf8_lossy(&self.body).trim().to_string());

        if text.is_empty() {
            return "no response body".to_string();
        }
        if text.chars().count() <= MAX_ERROR_TEXT {
            return text;
        }
        let mut cut: String = text.chars().take(MAX_ERROR_TEXT).collect();
        cut.push('…');
        cut
    }
}
