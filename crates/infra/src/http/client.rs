use std::time::Duration;

use edgemgmt_domain::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use edgemgmt_domain::{EdgeError, HttpOptions, Result};
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Thin wrapper around a reusable reqwest client.
///
/// One client is built per executor and shared by every request it sends.
/// There is no retry loop; each call is a single attempt.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client configured from session transport options.
    ///
    /// # Errors
    /// Returns `EdgeError::Config` if the proxy URL is invalid or the TLS
    /// backend cannot be initialized.
    pub fn from_options(options: &HttpOptions) -> Result<Self> {
        let mut builder = Self::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
            .user_agent(options.user_agent.clone());

        if let Some(proxy) = &options.proxy {
            builder = builder.proxy(proxy.clone());
        }

        builder.build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a built request once.
    ///
    /// Transport failures are returned as-is so the caller can classify them.
    pub async fn execute(&self, request: Request) -> std::result::Result<Response, reqwest::Error> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let result = self.client.execute(request).await;
        match &result {
            Ok(response) => debug!(%method, %url, status = %response.status(), "received HTTP response"),
            Err(err) => debug!(%method, %url, error = %err, "HTTP request failed"),
        }
        result
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            proxy: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Route every scheme through this proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `EdgeError::Config` for an invalid proxy URL or client setup.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent);

        builder = match self.proxy {
            Some(proxy) => builder.proxy(
                reqwest::Proxy::all(&proxy)
                    .map_err(|e| EdgeError::Config(format!("Invalid proxy URL '{proxy}': {e}")))?,
            ),
            None => builder.no_proxy(),
        };

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| EdgeError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
