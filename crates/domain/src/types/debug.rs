//! Per-call transaction snapshot

use std::time::Duration;

use serde_json::{json, Value};

/// Everything captured about one HTTP transaction.
///
/// A fresh value is produced by every executor call, handed to registered
/// observers, and then returned inside the `Transaction` or the
/// `ResponseError`. Authorization headers are redacted before capture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugData {
    pub method: String,
    pub uri: String,
    pub request_headers: Vec<(String, String)>,
    pub request_body: Option<String>,
    /// `0` when the request never produced an HTTP status.
    pub status_code: u16,
    pub code_class: u16,
    pub raw_body: String,
    /// Decoded JSON body, if the response carried one.
    pub data: Option<Value>,
    /// Error description for non-2xx and transport failures.
    pub exception: Option<String>,
    pub elapsed: Duration,
}

impl DebugData {
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// `true` when no HTTP status was received.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status_code == 0
    }

    /// JSON rendering suitable for structured logs.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let headers: serde_json::Map<String, Value> = self
            .request_headers
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();

        json!({
            "method": self.method,
            "uri": self.uri,
            "request_headers": headers,
            "request_body": self.request_body,
            "status_code": self.status_code,
            "code_class": self.code_class,
            "raw_body": self.raw_body,
            "data": self.data,
            "exception": self.exception,
            "elapsed_ms": u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
