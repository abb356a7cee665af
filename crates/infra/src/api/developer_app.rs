//! Developer app client
//!
//! Apps are scoped to one developer. Product membership is owned by the
//! app's credentials, so an update reconciles the requested product list
//! against the active credential:
//! - additions go out in one `POST /keys/{consumer_key}`
//! - removals go out as one `DELETE /keys/{consumer_key}/apiproducts/{product}` each

use std::sync::Arc;

use edgemgmt_core::{aggregate_status, diff_products, select_active_credential};
use edgemgmt_domain::utils::path;
use edgemgmt_domain::{ApprovalStatus, DeveloperApp, EdgeError, Result};
use serde_json::json;
use tracing::{debug, info, warn};

use super::accept_action_status;
use crate::http::{Payload, RequestExecutor, RequestOptions};

/// CRUD for the apps of one developer.
pub struct DeveloperAppClient {
    executor: Arc<RequestExecutor>,
    developer: String,
}

impl DeveloperAppClient {
    pub fn new(executor: Arc<RequestExecutor>, developer_email: impl Into<String>) -> Self {
        Self { executor, developer: developer_email.into() }
    }

    #[must_use]
    pub fn developer(&self) -> &str {
        &self.developer
    }

    fn path(&self, tail: &[&str]) -> Result<String> {
        path::validate_identifier(&self.developer, "developer email")?;
        for segment in tail {
            path::validate_identifier(segment, "app name or consumer key")?;
        }

        let mut segments = vec!["o", self.executor.organization(), "developers", self.developer.as_str(), "apps"];
        segments.extend_from_slice(tail);
        Ok(path::resource_path(&segments))
    }

    /// # Errors
    /// Returns the executor's error for a failed call.
    pub async fn list_names(&self) -> Result<Vec<String>> {
        let path = self.path(&[])?;
        self.executor.get(&path, &RequestOptions::new()).await?.json()
    }

    /// Load an app. `api_products` is filled from the active credential.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` for a blank name, or the executor's
    /// error (404 for an unknown app).
    pub async fn load(&self, name: &str) -> Result<DeveloperApp> {
        let mut app = self.fetch(name).await?;
        self.fill_products(&mut app);
        Ok(app)
    }

    /// Worst status across the app, its credentials and their products.
    ///
    /// # Errors
    /// Returns the load error, or `EdgeError::Parameter` for a status the
    /// client does not know.
    pub async fn aggregate_status(&self, name: &str) -> Result<ApprovalStatus> {
        aggregate_status(&self.fetch(name).await?)
    }

    /// Create or update the app.
    ///
    /// On create the requested products travel with the app. On update the
    /// app is replaced first, then the active credential's products are
    /// reconciled against `app.api_products`; an empty list leaves product
    /// membership alone.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` for a blank name, or the first failing
    /// call's error. A failure midway through reconciliation leaves the
    /// products already changed in place.
    pub async fn save(&self, app: &mut DeveloperApp) -> Result<()> {
        app.validate()?;
        let requested = app.api_products.clone();
        let created = app.is_new();

        let mut saved = if created {
            let path = self.path(&[])?;
            self.executor.post(&path, Payload::json(&*app)?, &RequestOptions::new()).await?.json()?
        } else {
            self.update(app, &requested).await?
        };

        if saved.api_products.is_empty() {
            saved.api_products = requested;
        }
        self.fill_products(&mut saved);

        info!(developer = %self.developer, app = %saved.name, created, "Saved developer app");
        *app = saved;
        Ok(())
    }

    async fn update(&self, app: &DeveloperApp, requested: &[String]) -> Result<DeveloperApp> {
        let mut body = serde_json::to_value(app)
            .map_err(|e| EdgeError::Serialization(format!("failed to encode app: {e}")))?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("apiProducts");
        }

        let path = self.path(&[app.name.as_str()])?;
        let updated: DeveloperApp =
            self.executor.put(&path, Payload::Json(body), &RequestOptions::new()).await?.json()?;

        if requested.is_empty() || !self.reconcile_products(&updated, requested).await? {
            return Ok(updated);
        }
        self.fetch(&updated.name).await
    }

    /// Returns `true` when any product was added or removed.
    async fn reconcile_products(&self, app: &DeveloperApp, requested: &[String]) -> Result<bool> {
        let now_ms = self.executor.clock().now_millis();
        let Some(credential) = select_active_credential(&app.credentials, now_ms) else {
            warn!(app = %app.name, "No active credential, API products left unchanged");
            return Ok(false);
        };

        let current: Vec<&str> = credential.product_names().collect();
        let diff = diff_products(&current, requested);
        if diff.is_empty() {
            debug!(app = %app.name, "API products already in sync");
            return Ok(false);
        }

        let key = credential.consumer_key.as_str();
        let options = RequestOptions::new();

        if !diff.add.is_empty() {
            let path = self.path(&[app.name.as_str(), "keys", key])?;
            let payload = Payload::json(&json!({ "apiProducts": diff.add }))?;
            self.executor.post(&path, payload, &options).await?;
        }

        for product in &diff.remove {
            let path = self.path(&[app.name.as_str(), "keys", key, "apiproducts", product.as_str()])?;
            self.executor.delete(&path, &options).await?;
        }

        info!(app = %app.name, added = ?diff.add, removed = ?diff.remove, "Reconciled credential products");
        Ok(true)
    }

    /// Delete the app; blanks the struct only on success.
    ///
    /// # Errors
    /// Returns the executor's error; `app` is left untouched.
    pub async fn delete(&self, app: &mut DeveloperApp) -> Result<()> {
        let path = self.path(&[app.name.as_str()])?;
        self.executor.delete(&path, &RequestOptions::new()).await?;

        info!(developer = %self.developer, app = %app.name, "Deleted developer app");
        app.blank();
        Ok(())
    }

    /// Approve or revoke an app. The server usually answers 204.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` for `Pending`, which apps cannot be
    /// moved into, or the executor's error.
    pub async fn set_status(&self, name: &str, status: ApprovalStatus) -> Result<()> {
        let path = self.path(&[name])?;
        self.post_action(&path, status).await?;

        info!(developer = %self.developer, app = name, status = %status, "Changed app status");
        Ok(())
    }

    /// Approve or revoke one product on one credential.
    ///
    /// # Errors
    /// See [`DeveloperAppClient::set_status`].
    pub async fn set_credential_product_status(
        &self,
        name: &str,
        consumer_key: &str,
        product: &str,
        status: ApprovalStatus,
    ) -> Result<()> {
        let path = self.path(&[name, "keys", consumer_key, "apiproducts", product])?;
        self.post_action(&path, status).await?;

        info!(app = name, product, status = %status, "Changed credential product status");
        Ok(())
    }

    /// # Errors
    /// Returns `EdgeError::Parameter` for blank identifiers, or the
    /// executor's error.
    pub async fn delete_credential(&self, name: &str, consumer_key: &str) -> Result<()> {
        let path = self.path(&[name, "keys", consumer_key])?;
        self.executor.delete(&path, &RequestOptions::new()).await?;

        info!(app = name, "Deleted credential");
        Ok(())
    }

    async fn fetch(&self, name: &str) -> Result<DeveloperApp> {
        let path = self.path(&[name])?;
        self.executor.get(&path, &RequestOptions::new()).await?.json()
    }

    async fn post_action(&self, path: &str, status: ApprovalStatus) -> Result<()> {
        if status == ApprovalStatus::Pending {
            return Err(EdgeError::Parameter("status can only be set to approved or revoked".into()));
        }

        let options = RequestOptions::new().query("action", status.action());
        let transaction = self.executor.post(path, Payload::Empty, &options).await?;
        accept_action_status(&transaction);
        Ok(())
    }

    fn fill_products(&self, app: &mut DeveloperApp) {
        if !app.api_products.is_empty() {
            return;
        }
        let now_ms = self.executor.clock().now_millis();
        if let Some(credential) = select_active_credential(&app.credentials, now_ms) {
            app.api_products = credential.product_names().map(String::from).collect();
        }
    }
}
