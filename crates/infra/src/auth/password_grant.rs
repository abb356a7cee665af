//! OAuth2 password-grant token manager
//!
//! Manages the bearer token lifecycle for the password-grant auth mode:
//! - In-memory token reused while it expires more than
//!   `TOKEN_EXPIRY_MARGIN_SECS` from now
//! - Persistent copy in [`CredentialStorage`] keyed by the SHA-256 of the
//!   credential set, so a new process skips the grant round trip
//! - Fresh `grant_type=password` request otherwise, persisted back under the
//!   same key

use std::sync::Arc;

use async_trait::async_trait;
use edgemgmt_common::{credential_cache_key, TokenSet};
use edgemgmt_core::{AccessTokenProvider, Clock, CredentialStorage, SystemClock};
use edgemgmt_domain::constants::TOKEN_EXPIRY_MARGIN_SECS;
use edgemgmt_domain::{EdgeError, PasswordGrantConfig, Result};
use reqwest::header::ACCEPT;
use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Token manager for the OAuth2 password grant
///
/// Concurrent callers serialize on an async mutex, so at most one grant
/// request is in flight per manager.
pub struct PasswordGrantTokenManager {
    http: HttpClient,
    config: PasswordGrantConfig,
    storage: Arc<dyn CredentialStorage>,
    clock: Arc<dyn Clock>,
    cache_key: String,
    current: Mutex<Option<TokenSet>>,
}

impl PasswordGrantTokenManager {
    pub fn new(http: HttpClient, config: PasswordGrantConfig, storage: Arc<dyn CredentialStorage>) -> Self {
        Self::with_clock(http, config, storage, Arc::new(SystemClock))
    }

    pub fn with_clock(
        http: HttpClient,
        config: PasswordGrantConfig,
        storage: Arc<dyn CredentialStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache_key = credential_cache_key(
            &config.username,
            &config.password,
            &config.client_id,
            &config.client_secret,
        );

        Self { http, config, storage, clock, cache_key, current: Mutex::new(None) }
    }

    /// Name under which the token is persisted.
    #[must_use]
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Drop the in-memory and persisted token.
    ///
    /// # Errors
    /// Returns storage errors from clearing the persisted copy.
    pub async fn invalidate(&self) -> Result<()> {
        *self.current.lock().await = None;
        self.storage.clear(&self.cache_key).await
    }

    fn is_fresh(&self, tokens: &TokenSet) -> bool {
        !tokens.is_expired(self.clock.now_unix(), TOKEN_EXPIRY_MARGIN_SECS)
    }

    // Storage failures degrade to an in-memory token; they never fail the call.
    async fn load_persisted(&self) -> Option<TokenSet> {
        let blob = match self.storage.read(&self.cache_key).await {
            Ok(blob) => blob?,
            Err(e) => {
                warn!(error = %e, "Token storage unavailable, skipping cached token");
                return None;
            }
        };

        match serde_json::from_str::<TokenSet>(&blob) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cached token");
                None
            }
        }
    }

    async fn persist(&self, tokens: &TokenSet) -> Result<()> {
        let blob = serde_json::to_string(tokens).map_err(|e| EdgeError::from(InfraError::from(e)))?;
        if let Err(e) = self.storage.write(&self.cache_key, &blob).await {
            warn!(error = %e, "Failed to persist password-grant token");
        }
        Ok(())
    }

    async fn request_token(&self) -> Result<TokenSet> {
        debug!(token_url = %self.config.token_url, username = %self.config.username, "Requesting password-grant token");

        let form = [
            ("grant_type", "password"),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let request = self
            .http
            .request(Method::POST, &self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(ACCEPT, "application/json")
            .form(&form)
            .build()
            .map_err(|e| EdgeError::from(InfraError::from(e)))?;

        let response =
            self.http.execute(request).await.map_err(|e| EdgeError::from(InfraError::from(e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| EdgeError::from(InfraError::from(e)))?;

        if !status.is_success() {
            warn!(%status, token_url = %self.config.token_url, "Password grant rejected");
            return Err(EdgeError::Auth(format!(
                "token request to {} failed with {status}: {}",
                self.config.token_url,
                body.trim()
            )));
        }

        let tokens: TokenSet = serde_json::from_str(&body)
            .map_err(|e| EdgeError::Auth(format!("invalid token response: {e}")))?;

        Ok(tokens.issued_at(self.clock.now_unix()))
    }
}

#[async_trait]
impl AccessTokenProvider for PasswordGrantTokenManager {
    async fn access_token(&self) -> Result<String> {
        let mut current = self.current.lock().await;

        if let Some(tokens) = current.as_ref().filter(|t| self.is_fresh(t)) {
            return Ok(tokens.access_token.clone());
        }

        if let Some(tokens) = self.load_persisted().await {
            if self.is_fresh(&tokens) {
                debug!("Using cached password-grant token");
                let access_token = tokens.access_token.clone();
                *current = Some(tokens);
                return Ok(access_token);
            }
            debug!("Cached password-grant token expired");
        }

        let tokens = self.request_token().await?;
        self.persist(&tokens).await?;
        info!(expires_at = ?tokens.expires_at, "Password-grant token issued");

        let access_token = tokens.access_token.clone();
        *current = Some(tokens);
        Ok(access_token)
    }
}
