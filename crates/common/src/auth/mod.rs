//! OAuth token primitives
//!
//! The password-grant flow itself lives in `edgemgmt-infra`; this module
//! holds the pieces that don't touch the network: the token set persisted
//! between runs and the key it is stored under.

pub mod cache_key;
pub mod types;

pub use cache_key::credential_cache_key;
pub use types::TokenSet;
