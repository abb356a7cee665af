//! API product client
//!
//! The expanded product list is the most expensive listing call in a
//! typical session, so it is memoized through an optional
//! [`CacheManager`]. Any save or delete drops the memoized list.

use std::sync::Arc;

use edgemgmt_core::CacheManager;
use edgemgmt_domain::constants::API_PRODUCT_LIST_CACHE_PREFIX;
use edgemgmt_domain::utils::path;
use edgemgmt_domain::{ApiProduct, EdgeError, Result};
use tracing::{debug, info, warn};

use super::{expanded, expanded_items};
use crate::http::{Payload, RequestExecutor, RequestOptions};

const COLLECTION: &str = "apiproducts";

/// CRUD for the API products of the session organization.
pub struct ApiProductClient {
    executor: Arc<RequestExecutor>,
    cache: Option<Arc<dyn CacheManager>>,
}

impl ApiProductClient {
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor, cache: None }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheManager>) -> Self {
        self.cache = Some(cache);
        self
    }

    fn collection(&self) -> String {
        path::collection_path(self.executor.organization(), COLLECTION)
    }

    fn entity(&self, name: &str) -> Result<String> {
        path::validate_identifier(name, "API product name")?;
        Ok(path::entity_path(self.executor.organization(), COLLECTION, name))
    }

    fn list_cache_key(&self) -> String {
        format!("{API_PRODUCT_LIST_CACHE_PREFIX}{}", self.executor.organization())
    }

    fn invalidate_list(&self) {
        if let Some(cache) = &self.cache {
            cache.clear(&self.list_cache_key());
        }
    }

    /// # Errors
    /// Returns the executor's error for a failed call.
    pub async fn list_names(&self) -> Result<Vec<String>> {
        self.executor.get(&self.collection(), &RequestOptions::new()).await?.json()
    }

    /// Every product, fully populated. Served from the cache when one is
    /// configured and holds the list.
    ///
    /// # Errors
    /// Returns the executor's error for a failed call.
    pub async fn list(&self) -> Result<Vec<ApiProduct>> {
        let key = self.list_cache_key();

        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            match serde_json::from_value::<Vec<ApiProduct>>(cached) {
                Ok(products) => {
                    debug!(count = products.len(), "API product list cache hit");
                    return Ok(products);
                }
                Err(e) => warn!(error = %e, "Discarding unreadable cached API product list"),
            }
        }

        let transaction = self.executor.get(&self.collection(), &expanded()).await?;
        let items = expanded_items(&transaction, "apiProduct");
        let products: Vec<ApiProduct> = serde_json::from_value(items.clone())
            .map_err(|e| EdgeError::Serialization(format!("unexpected API product listing: {e}")))?;

        if let Some(cache) = &self.cache {
            cache.set(&key, items);
        }
        Ok(products)
    }

    /// # Errors
    /// Returns `EdgeError::Parameter` for a blank name, or the executor's
    /// error (404 for an unknown product).
    pub async fn load(&self, name: &str) -> Result<ApiProduct> {
        let path = self.entity(name)?;
        self.executor.get(&path, &RequestOptions::new()).await?.json()
    }

    /// Create or update the product and copy the server's view back.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` for a blank name, or the executor's
    /// error for a failed call.
    pub async fn save(&self, product: &mut ApiProduct) -> Result<()> {
        product.validate()?;
        let payload = Payload::json(&*product)?;
        let created = product.is_new();

        let transaction = if created {
            self.executor.post(&self.collection(), payload, &RequestOptions::new()).await?
        } else {
            let path = self.entity(&product.name)?;
            self.executor.put(&path, payload, &RequestOptions::new()).await?
        };

        *product = transaction.json()?;
        self.invalidate_list();
        info!(product = %product.name, created, "Saved API product");
        Ok(())
    }

    /// Delete the product; blanks the struct only on success.
    ///
    /// # Errors
    /// Returns the executor's error; `product` is left untouched.
    pub async fn delete(&self, product: &mut ApiProduct) -> Result<()> {
        let path = self.entity(&product.name)?;
        self.executor.delete(&path, &RequestOptions::new()).await?;

        self.invalidate_list();
        info!(product = %product.name, "Deleted API product");
        product.blank();
        Ok(())
    }
}
