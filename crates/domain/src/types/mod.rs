//! Entity data types
//!
//! Field lists are declared statically through serde attributes. Read-only
//! server metadata (`createdAt`, `lastModifiedBy`, …) is deserialized but
//! never sent back.

pub mod api_product;
pub mod app;
pub mod attributes;
pub mod debug;
pub mod developer;
pub mod organization;
pub mod status;

pub use api_product::ApiProduct;
pub use app::{Credential, CredentialProduct, DeveloperApp};
pub use attributes::{Attribute, Attributes};
pub use debug::DebugData;
pub use developer::Developer;
pub use organization::{Organization, OrganizationProperties};
pub use status::{ApprovalStatus, ApprovalType, DeveloperStatus};
