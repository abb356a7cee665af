//! Client constants
//!
//! Centralized location for the defaults shared by every crate in the
//! workspace.

// Endpoints
pub const DEFAULT_ENDPOINT: &str = "https://api.enterprise.apigee.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://login.apigee.com/oauth/token";

// Public client credentials accepted by the authorization server for the
// password grant.
pub const DEFAULT_GRANT_CLIENT_ID: &str = "edgecli";
pub const DEFAULT_GRANT_CLIENT_SECRET: &str = "edgeclisecret";

/// A cached bearer token is reused only while it expires later than this.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 10;

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!("edgemgmt/", env!("CARGO_PKG_VERSION"));

/// `expiresAt` value of a credential that never expires.
pub const CREDENTIAL_NEVER_EXPIRES: i64 = -1;

// Content types
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_XML: &str = "application/xml";

/// Keychain service name under which cached tokens are stored.
pub const KEYCHAIN_SERVICE: &str = "edgemgmt.tokens";

/// Cache key for the memoized API product list of an organization.
pub const API_PRODUCT_LIST_CACHE_PREFIX: &str = "apiproducts:";
