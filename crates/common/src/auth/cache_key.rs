//! Credential-cache key derivation

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of `username:password:client_id:client_secret`.
///
/// Tokens are stored under this key so that changing any part of the
/// credential set (including the password) misses the cache instead of
/// reusing a token issued to someone else.
#[must_use]
pub fn credential_cache_key(
    username: &str,
    password: &str,
    client_id: &str,
    client_secret: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.update(b":");
    hasher.update(client_id.as_bytes());
    hasher.update(b":");
    hasher.update(client_secret.as_bytes());
    hex::encode(hasher.finalize())
}
