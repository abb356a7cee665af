//! Cache port
//!
//! Entity clients memoize expensive list calls through this trait. It is
//! synchronous; backends are in-memory.

use serde_json::Value;

/// Key/value cache for decoded response bodies.
pub trait CacheManager: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);

    /// Drop one entry.
    fn clear(&self, key: &str);

    /// Drop every entry.
    fn clear_all(&self);
}
