//! Conversions from external infrastructure errors into domain errors.

use edgemgmt_common::KeychainError;
use edgemgmt_domain::EdgeError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EdgeError);

impl From<InfraError> for EdgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EdgeError> for InfraError {
    fn from(value: EdgeError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoEdgeError {
    fn into_edge(self) -> EdgeError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → EdgeError */
/* -------------------------------------------------------------------------- */

impl IntoEdgeError for KeyringError {
    fn into_edge(self) -> EdgeError {
        use KeyringError::{Ambiguous, BadEncoding, Invalid, NoEntry, NoStorageAccess, PlatformFailure, TooLong};

        let description = self.to_string();

        match self {
            NoEntry => EdgeError::Storage("keychain entry not found".into()),
            BadEncoding(_) => EdgeError::Storage("credential in keychain is not valid UTF-8".into()),
            TooLong(name, limit) => EdgeError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                EdgeError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => EdgeError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => EdgeError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                EdgeError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => EdgeError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        Self(value.into_edge())
    }
}

impl IntoEdgeError for KeychainError {
    fn into_edge(self) -> EdgeError {
        match self {
            KeychainError::Keyring(err) => err.into_edge(),
            other => EdgeError::Storage(other.to_string()),
        }
    }
}

impl From<KeychainError> for InfraError {
    fn from(value: KeychainError) -> Self {
        Self(value.into_edge())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → EdgeError */
/* -------------------------------------------------------------------------- */

// The executor turns its own transport failures into code-0 response errors;
// the remaining reqwest traffic is the token grant.

impl IntoEdgeError for HttpError {
    fn into_edge(self) -> EdgeError {
        if self.is_builder() {
            return EdgeError::Config(format!("invalid HTTP client settings: {self}"));
        }
        if self.is_timeout() {
            return EdgeError::Auth("token request timed out".into());
        }
        if self.is_connect() {
            return EdgeError::Auth("token endpoint connection failure".into());
        }
        if self.is_decode() {
            return EdgeError::Serialization(format!("invalid response body: {self}"));
        }
        EdgeError::Auth(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_edge())
    }
}

/// Human-readable description of a transport failure, used as the status
/// phrase of a code-0 response error.
pub(crate) fn describe_transport_error(err: &HttpError) -> String {
    if err.is_timeout() {
        return format!("request timed out: {err}");
    }
    if err.is_connect() {
        return format!("connection failure: {err}");
    }
    err.to_string()
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → EdgeError */
/* -------------------------------------------------------------------------- */

impl IntoEdgeError for JsonError {
    fn into_edge(self) -> EdgeError {
        EdgeError::Serialization(format!("JSON error: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_edge())
    }
}

impl IntoEdgeError for TomlError {
    fn into_edge(self) -> EdgeError {
        EdgeError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        Self(value.into_edge())
    }
}

impl IntoEdgeError for std::io::Error {
    fn into_edge(self) -> EdgeError {
        EdgeError::Storage(format!("I/O error: {self}"))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        Self(value.into_edge())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
