//! Developer client

use std::sync::Arc;

use edgemgmt_domain::utils::path;
use edgemgmt_domain::{Developer, DeveloperStatus, EdgeError, Result};
use tracing::info;

use super::{accept_action_status, expanded, expanded_items};
use crate::http::{Payload, RequestExecutor, RequestOptions};

const COLLECTION: &str = "developers";

/// CRUD for the developers of the session organization.
pub struct DeveloperClient {
    executor: Arc<RequestExecutor>,
}

impl DeveloperClient {
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    fn collection(&self) -> String {
        path::collection_path(self.executor.organization(), COLLECTION)
    }

    fn entity(&self, email: &str) -> Result<String> {
        path::validate_identifier(email, "developer email")?;
        Ok(path::entity_path(self.executor.organization(), COLLECTION, email))
    }

    /// Emails of every developer in the organization.
    ///
    /// # Errors
    /// Returns the executor's error for a failed call.
    pub async fn list_emails(&self) -> Result<Vec<String>> {
        self.executor.get(&self.collection(), &RequestOptions::new()).await?.json()
    }

    /// Every developer, fully populated.
    ///
    /// # Errors
    /// Returns the executor's error for a failed call.
    pub async fn list(&self) -> Result<Vec<Developer>> {
        let transaction = self.executor.get(&self.collection(), &expanded()).await?;
        serde_json::from_value(expanded_items(&transaction, "developer"))
            .map_err(|e| EdgeError::Serialization(format!("unexpected developer listing: {e}")))
    }

    /// # Errors
    /// Returns `EdgeError::Parameter` for a blank email, or the executor's
    /// error (404 for an unknown developer).
    pub async fn load(&self, email: &str) -> Result<Developer> {
        let path = self.entity(email)?;
        self.executor.get(&path, &RequestOptions::new()).await?.json()
    }

    /// Create the developer when it has no server id yet, update it
    /// otherwise. The server's view is copied back onto `developer`.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` when a required field is blank, or the
    /// executor's error for a failed call.
    pub async fn save(&self, developer: &mut Developer) -> Result<()> {
        developer.validate()?;
        let payload = Payload::json(&*developer)?;
        let created = developer.is_new();

        let transaction = if created {
            self.executor.post(&self.collection(), payload, &RequestOptions::new()).await?
        } else {
            let path = self.entity(&developer.email)?;
            self.executor.put(&path, payload, &RequestOptions::new()).await?
        };

        *developer = transaction.json()?;
        info!(email = %developer.email, created, "Saved developer");
        Ok(())
    }

    /// Delete the developer. The struct is blanked only when the server
    /// confirmed the delete.
    ///
    /// # Errors
    /// Returns the executor's error; `developer` is left untouched.
    pub async fn delete(&self, developer: &mut Developer) -> Result<()> {
        let path = self.entity(&developer.email)?;
        self.executor.delete(&path, &RequestOptions::new()).await?;

        info!(email = %developer.email, "Deleted developer");
        developer.blank();
        Ok(())
    }

    /// Activate or deactivate a developer. The server answers 204; any other
    /// success status is accepted too.
    ///
    /// # Errors
    /// Returns the executor's error.
    pub async fn set_status(&self, email: &str, status: DeveloperStatus) -> Result<()> {
        let path = self.entity(email)?;
        let options = RequestOptions::new().query("action", status.action());
        let transaction = self.executor.post(&path, Payload::Empty, &options).await?;
        accept_action_status(&transaction);

        info!(email, status = %status, "Changed developer status");
        Ok(())
    }
}
