//! Response cache backends

pub mod moka_cache;

pub use moka_cache::{CacheConfig, MokaCacheManager};
