//! File-backed credential storage
//!
//! Each entry is written to `{dir}/{name}.json`. Writes go through a
//! temporary file and a rename so a crash never leaves half a token behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use edgemgmt_core::CredentialStorage;
use edgemgmt_domain::{EdgeError, Result};
use tracing::debug;

use super::validate_entry_name;
use crate::errors::InfraError;

#[derive(Debug, Clone)]
pub struct FileCredentialStorage {
    dir: PathBuf,
}

impl FileCredentialStorage {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        validate_entry_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }
}

fn io_error(err: std::io::Error) -> EdgeError {
    InfraError::from(err).into()
}

#[async_trait]
impl CredentialStorage for FileCredentialStorage {
    async fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.entry_path(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn write(&self, name: &str, blob: &str) -> Result<()> {
        let path = self.entry_path(name)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(io_error)?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob).await.map_err(io_error)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_error)?;

        debug!(path = %path.display(), "Credential entry written");
        Ok(())
    }

    async fn clear(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}
