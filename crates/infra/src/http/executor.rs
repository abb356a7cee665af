//! Request executor
//!
//! The single place where HTTP transactions happen. Entity clients hand it a
//! path relative to the session endpoint; it attaches credentials, sends the
//! request once, classifies the response and reports a [`DebugData`]
//! snapshot to every registered observer.

use std::sync::Arc;
use std::time::Instant;

use edgemgmt_core::{AccessTokenProvider, Clock, CredentialStorage, DebugObserver, SystemClock};
use edgemgmt_domain::{AuthMode, DebugData, EdgeConfig, EdgeError, ResponseError, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE,
    WWW_AUTHENTICATE,
};
use reqwest::{Method, Request, Response, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use super::client::HttpClient;
use super::digest::{generate_cnonce, DigestChallenge};
use super::payload::Payload;
use super::transaction::{parse_json_body, RequestOptions, Transaction};
use crate::auth::{Authenticator, PasswordGrantTokenManager, StaticTokenProvider};
use crate::errors::conversions::describe_transport_error;
use crate::storage::KeychainCredentialStorage;

const REDACTED: &str = "[REDACTED]";

/// Executes management API requests for one session.
///
/// Cheap to share behind an `Arc`; the underlying connection pool is reused
/// by every call.
pub struct RequestExecutor {
    http: HttpClient,
    config: Arc<EdgeConfig>,
    auth: Authenticator,
    observers: Vec<Arc<dyn DebugObserver>>,
    clock: Arc<dyn Clock>,
}

impl RequestExecutor {
    pub fn builder(config: EdgeConfig) -> RequestExecutorBuilder {
        RequestExecutorBuilder::new(config)
    }

    /// Executor with default collaborators.
    ///
    /// # Errors
    /// Returns `EdgeError::Config` for an invalid configuration.
    pub fn new(config: EdgeConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    #[must_use]
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    #[must_use]
    pub fn organization(&self) -> &str {
        &self.config.organization
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// # Errors
    /// See [`RequestExecutor::request`].
    pub async fn get(&self, path: &str, options: &RequestOptions) -> Result<Transaction> {
        self.request(Method::GET, path, Payload::Empty, options).await
    }

    /// # Errors
    /// See [`RequestExecutor::request`].
    pub async fn post(&self, path: &str, payload: Payload, options: &RequestOptions) -> Result<Transaction> {
        self.request(Method::POST, path, payload, options).await
    }

    /// # Errors
    /// See [`RequestExecutor::request`].
    pub async fn put(&self, path: &str, payload: Payload, options: &RequestOptions) -> Result<Transaction> {
        self.request(Method::PUT, path, payload, options).await
    }

    /// # Errors
    /// See [`RequestExecutor::request`].
    pub async fn delete(&self, path: &str, options: &RequestOptions) -> Result<Transaction> {
        self.request(Method::DELETE, path, Payload::Empty, options).await
    }

    /// # Errors
    /// See [`RequestExecutor::request`].
    pub async fn head(&self, path: &str, options: &RequestOptions) -> Result<Transaction> {
        self.request(Method::HEAD, path, Payload::Empty, options).await
    }

    /// Send one request to `endpoint + path`.
    ///
    /// # Errors
    /// - `EdgeError::Parameter` for an unusable path or header, before any I/O
    /// - `EdgeError::Auth` when a bearer token cannot be obtained
    /// - `EdgeError::Response` for a non-2xx status, or with status code 0
    ///   when the transport failed
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> Result<Transaction> {
        let url = self.build_url(path, &options.query)?;
        let headers = build_headers(&payload, options)?;
        let body = payload.body_text();
        let authorization = self.auth.preemptive_header().await?;

        let mut snapshot = DebugData {
            method: method.to_string(),
            uri: url.to_string(),
            request_headers: Self::sanitized_headers(&headers, authorization.is_some()),
            request_body: body.clone(),
            ..DebugData::default()
        };

        debug!(uri = %url, auth = self.auth.kind(), "dispatching request");
        let started = Instant::now();

        let response = match self.send(&method, &url, &headers, authorization, body).await {
            Ok(Sent { response, answered_challenge }) => {
                if answered_challenge {
                    snapshot.request_headers.push(redacted_authorization());
                }
                response
            }
            Err(err) => return Err(self.transport_failure(&err, snapshot, started)),
        };

        let status = response.status();
        let mime_type = header_string(&response, CONTENT_TYPE);
        let declared_length =
            header_string(&response, CONTENT_LENGTH).and_then(|len| len.trim().parse::<u64>().ok());

        let raw_body = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(self.transport_failure(&err, snapshot, started)),
        };

        let json = parse_json_body(mime_type.as_deref(), &raw_body);
        let status_code = status.as_u16();

        snapshot.status_code = status_code;
        snapshot.code_class = status_code / 100;
        snapshot.raw_body = raw_body.clone();
        snapshot.data = json.clone();
        snapshot.elapsed = started.elapsed();

        if snapshot.code_class != 2 {
            let phrase = status.canonical_reason().unwrap_or("Unknown Status");
            let mut error = ResponseError::from_status(status_code, phrase, url.as_str(), json, snapshot);
            error.debug.exception = Some(error.to_string());
            warn!(status = status_code, uri = %url, error_code = ?error.error_code, "request failed");
            self.notify(&error.debug);
            return Err(error.into());
        }

        self.notify(&snapshot);

        Ok(Transaction {
            status_code,
            code_class: snapshot.code_class,
            content_length: declared_length.or_else(|| u64::try_from(raw_body.len()).ok()),
            raw_body,
            json,
            mime_type,
            debug: snapshot,
        })
    }

    fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| EdgeError::Parameter(format!("invalid request path '{path}': {e}")))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(name, value)| (name.as_str(), value.as_str())));
        }
        Ok(url)
    }

    /// Send the request; for digest auth, answer a 401 challenge once.
    async fn send(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        authorization: Option<String>,
        body: Option<String>,
    ) -> std::result::Result<Sent, reqwest::Error> {
        let first = self.build_request(method, url, headers, authorization.as_deref(), body.clone())?;
        let response = self.http.execute(first).await?;

        let Authenticator::Digest { username, password } = &self.auth else {
            return Ok(Sent { response, answered_challenge: false });
        };
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(Sent { response, answered_challenge: false });
        }

        let challenge = response
            .headers()
            .get_all(WWW_AUTHENTICATE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(DigestChallenge::parse);

        let Some(challenge) = challenge else {
            return Ok(Sent { response, answered_challenge: false });
        };

        debug!(realm = %challenge.realm, "answering digest challenge");
        let header = challenge.authorization(
            username,
            password,
            method.as_str(),
            &request_target(url),
            &generate_cnonce(),
            1,
        );

        let retry = self.build_request(method, url, headers, Some(&header), body)?;
        let response = self.http.execute(retry).await?;
        Ok(Sent { response, answered_challenge: true })
    }

    fn build_request(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        authorization: Option<&str>,
        body: Option<String>,
    ) -> std::result::Result<Request, reqwest::Error> {
        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers.clone());
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.build()
    }

    fn transport_failure(&self, err: &reqwest::Error, mut snapshot: DebugData, started: Instant) -> EdgeError {
        let description = describe_transport_error(err);
        let uri = snapshot.uri.clone();
        snapshot.elapsed = started.elapsed();
        snapshot.exception = Some(description.clone());
        warn!(uri = %uri, error = %description, "transport failure");
        self.notify(&snapshot);

        ResponseError::transport(uri, description, snapshot).into()
    }

    /// Request headers as captured in the snapshot. The credential header is
    /// recorded redacted, and only when one was actually sent.
    fn sanitized_headers(headers: &HeaderMap, authorized: bool) -> Vec<(String, String)> {
        let mut captured: Vec<(String, String)> = headers
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), value.to_str().unwrap_or("<binary>").to_string())
            })
            .collect();

        if authorized {
            captured.push(redacted_authorization());
        }
        captured
    }

    fn notify(&self, data: &DebugData) {
        for observer in &self.observers {
            observer.on_transaction(data);
        }
    }
}

/// Response of the final leg, and whether a digest challenge was answered
/// to get it.
struct Sent {
    response: Response,
    answered_challenge: bool,
}

fn redacted_authorization() -> (String, String) {
    (AUTHORIZATION.as_str().to_string(), REDACTED.to_string())
}

fn build_headers(payload: &Payload, options: &RequestOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value(options.accept_or_default())?);

    if let Some(content_type) = payload.content_type() {
        headers.insert(CONTENT_TYPE, header_value(content_type)?);
    }

    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| EdgeError::Parameter(format!("invalid header name '{name}': {e}")))?;
        if name == AUTHORIZATION {
            return Err(EdgeError::Parameter(
                "the Authorization header is managed by the session credentials".into(),
            ));
        }
        headers.insert(name, header_value(value)?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| EdgeError::Parameter(format!("invalid header value '{value}': {e}")))
}

fn header_string(response: &Response, name: HeaderName) -> Option<String> {
    response.headers().get(name).and_then(|value| value.to_str().ok()).map(String::from)
}

/// Path plus query, as it appears on the request line.
fn request_target(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

/// Builder for [`RequestExecutor`].
pub struct RequestExecutorBuilder {
    config: EdgeConfig,
    observers: Vec<Arc<dyn DebugObserver>>,
    credential_storage: Option<Arc<dyn CredentialStorage>>,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
    clock: Option<Arc<dyn Clock>>,
    http: Option<HttpClient>,
}

impl RequestExecutorBuilder {
    fn new(config: EdgeConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            credential_storage: None,
            token_provider: None,
            clock: None,
            http: None,
        }
    }

    /// Register an observer called with every transaction's snapshot.
    pub fn observer(mut self, observer: impl DebugObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    pub fn shared_observer(mut self, observer: Arc<dyn DebugObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Where password-grant tokens are persisted. Defaults to the platform
    /// keychain.
    pub fn credential_storage(mut self, storage: Arc<dyn CredentialStorage>) -> Self {
        self.credential_storage = Some(storage);
        self
    }

    /// Use this bearer token source instead of the configured auth mode.
    pub fn token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// # Errors
    /// Returns `EdgeError::Config` when the configuration fails validation
    /// or the HTTP client cannot be built.
    pub fn build(self) -> Result<RequestExecutor> {
        self.config.validate()?;

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::from_options(&self.config.http)?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let auth = match (self.token_provider, &self.config.auth) {
            (Some(provider), _) => Authenticator::bearer(provider),
            (None, AuthMode::Basic { username, password }) => Authenticator::basic(username, password),
            (None, AuthMode::Digest { username, password }) => {
                Authenticator::digest(username.clone(), password.clone())
            }
            (None, AuthMode::Bearer { token }) => {
                Authenticator::bearer(Arc::new(StaticTokenProvider::new(token.clone())))
            }
            (None, AuthMode::PasswordGrant(grant)) => {
                let storage = self
                    .credential_storage
                    .unwrap_or_else(|| Arc::new(KeychainCredentialStorage::default()));
                Authenticator::bearer(Arc::new(PasswordGrantTokenManager::with_clock(
                    http.clone(),
                    grant.clone(),
                    storage,
                    Arc::clone(&clock),
                )))
            }
        };

        debug!(
            organization = %self.config.organization,
            endpoint = %self.config.base_url(),
            auth = auth.kind(),
            observers = self.observers.len(),
            "request executor ready"
        );

        Ok(RequestExecutor {
            http,
            config: Arc::new(self.config),
            auth,
            observers: self.observers,
            clock,
        })
    }
}
