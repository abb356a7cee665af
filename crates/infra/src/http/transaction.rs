//! Per-request options and the classified result of a successful call

use edgemgmt_domain::constants::CONTENT_TYPE_JSON;
use edgemgmt_domain::{DebugData, EdgeError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Options applied to a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// `Accept` header; defaults to `application/json`.
    pub accept: Option<String>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub(crate) fn accept_or_default(&self) -> &str {
        self.accept.as_deref().unwrap_or(CONTENT_TYPE_JSON)
    }
}

/// A 2xx response, fully read and classified.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub status_code: u16,
    /// Always `2` for a transaction; kept for symmetry with error responses.
    pub code_class: u16,
    pub raw_body: String,
    /// Parsed body, present only for JSON content whose text starts with
    /// `{` or `[` and parses cleanly.
    pub json: Option<Value>,
    pub content_length: Option<u64>,
    pub mime_type: Option<String>,
    pub debug: DebugData,
}

impl Transaction {
    /// Deserialize the parsed body into `T`.
    ///
    /// # Errors
    /// Returns `EdgeError::Serialization` if the response had no JSON body
    /// or it does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.json.clone().ok_or_else(|| {
            EdgeError::Serialization(format!(
                "expected a JSON body from {} but got {}",
                self.debug.uri,
                self.mime_type.as_deref().unwrap_or("no content type")
            ))
        })?;

        serde_json::from_value(value).map_err(|e| {
            EdgeError::Serialization(format!("unexpected response shape from {}: {e}", self.debug.uri))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_body.trim().is_empty()
    }
}

/// Decode `body` only when the content type says JSON and the text looks
/// like a JSON document. Malformed JSON yields `None`, not an error.
pub(crate) fn parse_json_body(mime_type: Option<&str>, body: &str) -> Option<Value> {
    let is_json = mime_type.is_some_and(|mime| mime.to_ascii_lowercase().contains("/json"));
    let trimmed = body.trim_start();
    if !is_json || !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}
