//! Common helpers shared across edgemgmt crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: OAuth token set, credential-cache key hashing
//! - `platform`: OS keychain access

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Re-export commonly used types
// ------------------------
#[cfg(feature = "foundation")]
pub use auth::{credential_cache_key, TokenSet};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider};
