//! # edgemgmt core
//!
//! Ports and business rules - no HTTP, storage or platform code.
//!
//! This crate contains:
//! - Port interfaces (traits) for credential storage, caching, token
//!   providers, clocks and debug observers
//! - Developer-app rules: active credential selection, product diffing and
//!   status aggregation
//!
//! ## Architecture Principles
//! - Only depends on `edgemgmt-domain`
//! - All collaborators are injected through traits
//! - Pure, testable business logic

pub mod apps;
pub mod auth;
pub mod cache;
pub mod debug;

// Re-export specific items to avoid ambiguity
pub use apps::rules::{aggregate_status, diff_products, select_active_credential, ProductDiff};
pub use auth::ports::{AccessTokenProvider, Clock, CredentialStorage, SystemClock};
pub use cache::ports::CacheManager;
pub use debug::ports::DebugObserver;
