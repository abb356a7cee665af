//! Keychain provider for secret storage
//!
//! Thin wrapper over the platform keychain (macOS Keychain Access, Windows
//! Credential Manager, Linux Secret Service). Secrets are grouped under one
//! service name; each secret is an account within that service.
//!
//! ```no_run
//! use edgemgmt_common::security::KeychainProvider;
//!
//! let keychain = KeychainProvider::new("edgemgmt.tokens");
//! keychain.set_secret("3f7a...", "{\"access_token\":\"...\"}")?;
//! let blob = keychain.get_secret("3f7a...")?;
//! # Ok::<(), edgemgmt_common::security::KeychainError>(())
//! ```

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

/// Keychain provider scoped to one service name
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Store a secret value, overwriting any previous one
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if keychain access fails
    pub fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        let entry = self.create_entry(key)?;
        entry.set_password(value).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to store secret for {key}: {e}"))
        })?;

        Ok(())
    }

    /// Retrieve a secret value
    ///
    /// # Errors
    /// Returns `KeychainError::NotFound` if the secret doesn't exist,
    /// `KeychainError::AccessFailed` if keychain access fails
    pub fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        let entry = self.create_entry(key)?;
        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => KeychainError::NotFound,
            other => {
                KeychainError::AccessFailed(format!("Failed to retrieve secret for {key}: {other}"))
            }
        })
    }

    /// Delete a secret (idempotent)
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if keychain access fails
    pub fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        let entry = self.create_entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeychainError::AccessFailed(format!(
                "Failed to delete secret for {key}: {e}"
            ))),
        }
    }

    #[must_use]
    pub fn secret_exists(&self, key: &str) -> bool {
        self.create_entry(key).is_ok_and(|entry| entry.get_password().is_ok())
    }

    fn create_entry(&self, account: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, account).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to create keychain entry: {e}"))
        })
    }
}

/// Keychain error types
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Keychain access failed (permission denied, not available, etc.)
    #[error("Keychain access failed: {0}")]
    AccessFailed(String),

    #[error("Entry not found")]
    NotFound,

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}
