//! Port interfaces for credentials and tokens
//!
//! These traits define the boundaries between the request executor and the
//! places tokens come from and are persisted to.

use async_trait::async_trait;
use chrono::Utc;
use edgemgmt_domain::Result;

/// Trait for providing bearer access tokens
///
/// Implementations handle caching and renewal; the executor only asks for a
/// currently valid token before each request.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    async fn access_token(&self) -> Result<String>;
}

/// Persistent store for opaque credential blobs, addressed by name.
///
/// The password-grant token manager stores one JSON document per
/// credential-cache key.
#[async_trait]
pub trait CredentialStorage: Send + Sync {
    /// Read a stored blob. `Ok(None)` when nothing is stored under `name`.
    async fn read(&self, name: &str) -> Result<Option<String>>;

    /// Store a blob, overwriting any previous value.
    async fn write(&self, name: &str, blob: &str) -> Result<()>;

    /// Remove a blob. Removing a missing entry is not an error.
    async fn clear(&self, name: &str) -> Result<()>;
}

/// Source of the current time, injectable so expiry logic can be tested.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now_unix(&self) -> i64;

    /// Current Unix time in milliseconds.
    fn now_millis(&self) -> i64 {
        self.now_unix().saturating_mul(1_000)
    }
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
