//! Session configuration
//!
//! One [`EdgeConfig`] is created per session and shared by every entity
//! client. It is plain data; loading from the environment or from files lives
//! in `edgemgmt-infra::config`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_ENDPOINT, DEFAULT_GRANT_CLIENT_ID,
    DEFAULT_GRANT_CLIENT_SECRET, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_URL, USER_AGENT,
};
use crate::errors::{EdgeError, Result};
use crate::utils::path;

/// Connection settings for one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Organization every resource path is scoped to.
    pub organization: String,

    /// Management API base URL (e.g. "https://api.enterprise.apigee.com/v1").
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    pub auth: AuthMode,

    #[serde(default)]
    pub http: HttpOptions,
}

impl EdgeConfig {
    #[must_use]
    pub fn new(organization: impl Into<String>, auth: AuthMode) -> Self {
        Self {
            organization: organization.into(),
            endpoint: default_endpoint(),
            auth,
            http: HttpOptions::default(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_http(mut self, http: HttpOptions) -> Self {
        self.http = http;
        self
    }

    /// Endpoint without a trailing slash, ready for `base_url + path`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// `/o/{organization}` with the organization percent-encoded.
    #[must_use]
    pub fn organization_path(&self) -> String {
        path::organization_path(&self.organization)
    }

    /// Check required fields before any client is built.
    ///
    /// # Errors
    /// Returns `EdgeError::Config` when the organization is blank or a dot
    /// segment, the endpoint is not an http(s) URL, or the credentials are incomplete.
    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            return Err(EdgeError::Config("organization must not be empty".into()));
        }
        if self.organization == "." || self.organization == ".." {
            return Err(EdgeError::Config("organization must not be a dot segment".into()));
        }

        let endpoint = self.endpoint.to_ascii_lowercase();
        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            return Err(EdgeError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        self.auth.validate()
    }
}

/// Credential attached to every request. Exactly one mode per session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AuthMode {
    Basic { username: String, password: String },
    Digest { username: String, password: String },
    /// Pre-issued bearer token.
    Bearer { token: String },
    /// Bearer token obtained (and cached) through the OAuth2 password grant.
    PasswordGrant(PasswordGrantConfig),
}

impl AuthMode {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Digest { .. } => "digest",
            Self::Bearer { .. } => "bearer",
            Self::PasswordGrant(_) => "password_grant",
        }
    }

    fn validate(&self) -> Result<()> {
        let missing = match self {
            Self::Basic { username, .. } | Self::Digest { username, .. } => {
                username.is_empty().then_some("username")
            }
            Self::Bearer { token } => token.is_empty().then_some("token"),
            Self::PasswordGrant(grant) => {
                if grant.username.is_empty() {
                    Some("username")
                } else if grant.token_url.is_empty() {
                    Some("token_url")
                } else {
                    None
                }
            }
        };

        match missing {
            Some(field) => Err(EdgeError::Config(format!(
                "{} authentication requires a non-empty {field}",
                self.kind()
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => {
                f.debug_struct("Basic").field("username", username).finish_non_exhaustive()
            }
            Self::Digest { username, .. } => {
                f.debug_struct("Digest").field("username", username).finish_non_exhaustive()
            }
            Self::Bearer { .. } => f.write_str("Bearer { .. }"),
            Self::PasswordGrant(grant) => f.debug_tuple("PasswordGrant").field(grant).finish(),
        }
    }
}

/// OAuth2 password-grant parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordGrantConfig {
    pub username: String,
    pub password: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_client_secret")]
    pub client_secret: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl PasswordGrantConfig {
    /// Grant against the default authorization server with the public client.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_id: default_client_id(),
            client_secret: default_client_secret(),
            token_url: default_token_url(),
        }
    }

    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    #[must_use]
    pub fn with_client(mut self, client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self.client_secret = secret.into();
        self
    }
}

impl fmt::Debug for PasswordGrantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordGrantConfig")
            .field("username", &self.username)
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Transport settings fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOptions {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Proxy URL applied to every scheme.
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            proxy: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_client_id() -> String {
    DEFAULT_GRANT_CLIENT_ID.to_string()
}

fn default_client_secret() -> String {
    DEFAULT_GRANT_CLIENT_SECRET.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}
