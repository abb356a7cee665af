//! Keychain-backed credential storage

use async_trait::async_trait;
use edgemgmt_common::{KeychainError, KeychainProvider};
use edgemgmt_core::CredentialStorage;
use edgemgmt_domain::constants::KEYCHAIN_SERVICE;
use edgemgmt_domain::{EdgeError, Result};

use super::validate_entry_name;
use crate::errors::InfraError;

/// Stores each entry as a keychain secret under one service name.
///
/// Keychain calls block, so they run on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct KeychainCredentialStorage {
    keychain: KeychainProvider,
}

impl KeychainCredentialStorage {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { keychain: KeychainProvider::new(service_name) }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        self.keychain.service_name()
    }

    async fn blocking<T, F>(&self, name: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&KeychainProvider, &str) -> std::result::Result<T, KeychainError> + Send + 'static,
    {
        validate_entry_name(name)?;
        let keychain = self.keychain.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || op(&keychain, &name))
            .await
            .map_err(|e| EdgeError::Storage(format!("keychain task failed: {e}")))?
            .map_err(|e| InfraError::from(e).into())
    }
}

impl Default for KeychainCredentialStorage {
    fn default() -> Self {
        Self::new(KEYCHAIN_SERVICE)
    }
}

#[async_trait]
impl CredentialStorage for KeychainCredentialStorage {
    async fn read(&self, name: &str) -> Result<Option<String>> {
        self.blocking(name, |keychain, name| match keychain.get_secret(name) {
            Ok(secret) => Ok(Some(secret)),
            Err(KeychainError::NotFound) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn write(&self, name: &str, blob: &str) -> Result<()> {
        let blob = blob.to_string();
        self.blocking(name, move |keychain, name| keychain.set_secret(name, &blob)).await
    }

    async fn clear(&self, name: &str) -> Result<()> {
        self.blocking(name, |keychain, name| keychain.delete_secret(name)).await
    }
}
