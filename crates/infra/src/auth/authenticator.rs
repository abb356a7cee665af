//! Authentication strategies

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use edgemgmt_core::AccessTokenProvider;
use edgemgmt_domain::Result;

/// How the executor attaches credentials to a request.
#[derive(Clone)]
pub enum Authenticator {
    /// Precomputed `Basic base64(user:pass)` header value.
    Basic { header: String },
    /// Answered only after the server issues a challenge.
    Digest { username: String, password: String },
    Bearer(Arc<dyn AccessTokenProvider>),
}

impl Authenticator {
    pub fn basic(username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        Self::Basic { header: format!("Basic {encoded}") }
    }

    pub fn digest(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Digest { username: username.into(), password: password.into() }
    }

    pub fn bearer(provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self::Bearer(provider)
    }

    /// `Authorization` header to send up front. Digest returns `None`; its
    /// header depends on the server's challenge.
    ///
    /// # Errors
    /// Propagates token provider failures.
    pub async fn preemptive_header(&self) -> Result<Option<String>> {
        match self {
            Self::Digest { .. } => Ok(None),
            Self::Basic { header } => Ok(Some(header.clone())),
            Self::Bearer(provider) => {
                let token = provider.access_token().await?;
                Ok(Some(format!("Bearer {token}")))
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Digest { .. } => "digest",
            Self::Bearer(_) => "bearer",
        }
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digest { username, .. } => {
                f.debug_struct("Digest").field("username", username).finish_non_exhaustive()
            }
            other => f.write_str(other.kind()),
        }
    }
}

/// Pre-issued bearer token.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
