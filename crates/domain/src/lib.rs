//! # edgemgmt domain
//!
//! Data types for the Edge management API client.
//!
//! This crate contains:
//! - Entity types (Organization, Developer, DeveloperApp, ApiProduct)
//! - The error taxonomy (`EdgeError`, `ResponseError`, `ApiFault`)
//! - Session configuration (`EdgeConfig`, `AuthMode`)
//! - Constants and resource path helpers
//!
//! ## Architecture
//! - No dependencies on other edgemgmt crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
