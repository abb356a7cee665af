//! Response caching with moka
//!
//! In-memory [`CacheManager`] used by entity clients to memoize list calls.
//! Entries expire after a configurable TTL and the cache is bounded by
//! entry count.
//!
//! ```rust
//! use edgemgmt_core::CacheManager;
//! use edgemgmt_infra::cache::{CacheConfig, MokaCacheManager};
//!
//! let cache = MokaCacheManager::new(CacheConfig::default());
//! cache.set("apiproducts:acme", serde_json::json!(["weather"]));
//! assert!(cache.get("apiproducts:acme").is_some());
//! ```

use std::time::Duration;

use edgemgmt_core::CacheManager;
use moka::sync::Cache;
use serde_json::Value;

/// Default TTL for cache entries (5 minutes)
///
/// Override via `EDGE_CACHE_TTL_SECONDS` environment variable
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Default max capacity (1000 entries)
///
/// Override via `EDGE_CACHE_MAX_CAPACITY` environment variable
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 1000;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for cache entries
    pub ttl: Duration,

    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(
                std::env::var("EDGE_CACHE_TTL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            ),
            max_capacity: std::env::var("EDGE_CACHE_MAX_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CACHE_MAX_CAPACITY),
        }
    }
}

impl CacheConfig {
    /// Create config with custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, max_capacity: DEFAULT_CACHE_MAX_CAPACITY }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            ttl_seconds = self.ttl.as_secs(),
            max_capacity = self.max_capacity,
            "Response cache configuration loaded"
        );
    }
}

/// moka-backed [`CacheManager`]
#[derive(Clone)]
pub struct MokaCacheManager {
    cache: Cache<String, Value>,
}

impl MokaCacheManager {
    pub fn new(config: CacheConfig) -> Self {
        config.log_config();
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Number of live entries (approximate until pending tasks run).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MokaCacheManager {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl CacheManager for MokaCacheManager {
    fn get(&self, key: &str) -> Option<Value> {
        let hit = self.cache.get(key);
        tracing::trace!(key, hit = hit.is_some(), "cache lookup");
        hit
    }

    fn set(&self, key: &str, value: Value) {
        self.cache.insert(key.to_string(), value);
    }

    fn clear(&self, key: &str) {
        self.cache.invalidate(key);
    }

    fn clear_all(&self) {
        self.cache.invalidate_all();
    }
}
