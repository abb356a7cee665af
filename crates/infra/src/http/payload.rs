//! Request bodies

use edgemgmt_domain::constants::{CONTENT_TYPE_JSON, CONTENT_TYPE_XML};
use edgemgmt_domain::{EdgeError, Result};
use serde::Serialize;
use serde_json::Value;

/// Body of a request, carrying its own content type.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    Json(Value),
    /// XML document already serialized to text.
    Xml(String),
    /// Passed through unchanged.
    Text { content_type: String, body: String },
}

impl Payload {
    /// Serialize any `Serialize` value into a JSON payload.
    ///
    /// # Errors
    /// Returns `EdgeError::Serialization` if the value cannot be represented
    /// as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| EdgeError::Serialization(format!("failed to encode request body: {e}")))
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some(CONTENT_TYPE_JSON),
            Self::Xml(_) => Some(CONTENT_TYPE_XML),
            Self::Text { content_type, .. } => Some(content_type),
        }
    }

    /// Wire text of the body, `None` for an empty payload.
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Json(value) => Some(value.to_string()),
            Self::Xml(body) | Self::Text { body, .. } => Some(body.clone()),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}
