//! Credential storage backends
//!
//! Implementations of [`CredentialStorage`](edgemgmt_core::CredentialStorage):
//! - [`KeychainCredentialStorage`]: platform keychain via `keyring`
//! - [`FileCredentialStorage`]: one JSON file per entry in a directory
//! - [`MemoryCredentialStorage`]: process-local map

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileCredentialStorage;
pub use keychain::KeychainCredentialStorage;
pub use memory::MemoryCredentialStorage;

use edgemgmt_domain::{EdgeError, Result};

/// Entry names become file names and keychain accounts; keep them to a
/// portable character set.
pub(crate) fn validate_entry_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 128
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !name.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(EdgeError::Parameter(format!("invalid credential entry name '{name}'")))
    }
}
