//! OAuth 2.0 token set

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access token plus metadata, as returned by the authorization server and
/// as persisted in credential storage.
///
/// The grant response carries only `expires_in`; [`TokenSet::issued_at`]
/// stamps the absolute expiry so a stored token can be checked later
/// without knowing when it was fetched.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,

    /// Optional because the grant may not issue one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,

    /// Absolute expiry, Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenSet {
    #[must_use]
    pub fn new(access_token: impl Into<String>, expires_in: i64, now: i64) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            token_type: default_token_type(),
            expires_in,
            expires_at: None,
            scope: None,
        }
        .issued_at(now)
    }

    /// Stamp `expires_at = now + expires_in`. Non-positive lifetimes leave
    /// the token without an expiry.
    #[must_use]
    pub fn issued_at(mut self, now: i64) -> Self {
        self.expires_at = (self.expires_in > 0).then(|| now.saturating_add(self.expires_in));
        self
    }

    /// `true` if the token expires within `margin_secs` of `now`.
    ///
    /// A token without a recorded expiry is treated as expired; it cannot be
    /// proven valid.
    #[must_use]
    pub fn is_expired(&self, now: i64, margin_secs: i64) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at - now <= margin_secs)
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}
