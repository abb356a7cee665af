//! In-memory credential storage

use std::collections::HashMap;

use async_trait::async_trait;
use edgemgmt_core::CredentialStorage;
use edgemgmt_domain::Result;
use parking_lot::RwLock;

/// Process-local storage; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryCredentialStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CredentialStorage for MemoryCredentialStorage {
    async fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(name).cloned())
    }

    async fn write(&self, name: &str, blob: &str) -> Result<()> {
        self.entries.write().insert(name.to_string(), blob.to_string());
        Ok(())
    }

    async fn clear(&self, name: &str) -> Result<()> {
        self.entries.write().remove(name);
        Ok(())
    }
}
