//! Entity clients for the management API
//!
//! Each client computes resource paths for one entity type, delegates the
//! HTTP transaction to the shared [`RequestExecutor`] and maps JSON to and
//! from the domain structs. [`EdgeClient`] hands out clients that share one
//! executor and one optional cache.

pub mod api_product;
pub mod developer;
pub mod developer_app;
pub mod organization;

use std::sync::Arc;

use edgemgmt_core::CacheManager;
use edgemgmt_domain::{EdgeConfig, Result};
use tracing::debug;

pub use api_product::ApiProductClient;
pub use developer::DeveloperClient;
pub use developer_app::DeveloperAppClient;
pub use organization::OrganizationClient;

use crate::http::{RequestExecutor, RequestOptions, Transaction};

/// Session facade: one executor, any number of entity clients.
#[derive(Clone)]
pub struct EdgeClient {
    executor: Arc<RequestExecutor>,
    cache: Option<Arc<dyn CacheManager>>,
}

impl EdgeClient {
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor: Arc::new(executor), cache: None }
    }

    /// Build a client with default collaborators from `config`.
    ///
    /// # Errors
    /// Returns `EdgeError::Config` for an invalid configuration.
    pub fn from_config(config: EdgeConfig) -> Result<Self> {
        Ok(Self::new(RequestExecutor::new(config)?))
    }

    /// Memoize expensive list calls through `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheManager>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    #[must_use]
    pub fn organization(&self) -> OrganizationClient {
        OrganizationClient::new(Arc::clone(&self.executor))
    }

    #[must_use]
    pub fn developers(&self) -> DeveloperClient {
        DeveloperClient::new(Arc::clone(&self.executor))
    }

    #[must_use]
    pub fn api_products(&self) -> ApiProductClient {
        let client = ApiProductClient::new(Arc::clone(&self.executor));
        match &self.cache {
            Some(cache) => client.with_cache(Arc::clone(cache)),
            None => client,
        }
    }

    /// Apps owned by the developer with this email.
    #[must_use]
    pub fn developer_apps(&self, developer_email: &str) -> DeveloperAppClient {
        DeveloperAppClient::new(Arc::clone(&self.executor), developer_email)
    }
}

fn expanded() -> RequestOptions {
    RequestOptions::new().query("expand", "true")
}

/// Pull the array out of an expanded listing (`{"developer": [...]}`).
///
/// Servers answer an empty collection with `{}`, which yields no items.
fn expanded_items(transaction: &Transaction, field: &str) -> serde_json::Value {
    transaction
        .json
        .as_ref()
        .and_then(|body| body.get(field))
        .cloned()
        .unwrap_or_else(|| serde_json::Value::Array(Vec::new()))
}

/// Action endpoints usually answer 204 without a body. Any 2xx counts as
/// success; non-2xx statuses never reach here since the executor rejects them.
fn accept_action_status(transaction: &Transaction) {
    if transaction.status_code != 204 {
        debug!(status = transaction.status_code, uri = %transaction.debug.uri, "action answered with a body status");
    }
}
