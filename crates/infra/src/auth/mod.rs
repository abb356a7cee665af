//! Credential injection for outgoing requests
//!
//! - [`Authenticator`]: per-session strategy chosen from [`AuthMode`](edgemgmt_domain::AuthMode)
//! - [`PasswordGrantTokenManager`]: OAuth2 password grant with a persistent token cache
//! - [`StaticTokenProvider`]: pre-issued bearer token

pub mod authenticator;
pub mod password_grant;

pub use authenticator::{Authenticator, StaticTokenProvider};
pub use password_grant::PasswordGrantTokenManager;
