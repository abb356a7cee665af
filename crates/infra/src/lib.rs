//! # edgemgmt infrastructure
//!
//! Everything that performs I/O on behalf of the client.
//!
//! This crate contains:
//! - The request executor and its HTTP transport
//! - Authentication: basic, digest, static bearer and password grant
//! - Credential storage backends (keychain, files, memory) and the moka cache
//! - Configuration loading and tracing setup
//! - Entity clients for organizations, developers, developer apps and API products
//!
//! ## Architecture
//! - Implements the ports defined in `edgemgmt-core`
//! - Depends on `edgemgmt-domain`, `edgemgmt-core` and `edgemgmt-common`

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::*;
pub use auth::*;
pub use cache::*;
pub use errors::InfraError;
pub use http::*;
pub use observability::{init_tracing, LogFormat, TracingDebugObserver};
pub use storage::*;
