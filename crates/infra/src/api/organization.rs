//! Organization client

use std::sync::Arc;

use edgemgmt_domain::utils::path;
use edgemgmt_domain::{Organization, Result};
use tracing::debug;

use crate::http::{RequestExecutor, RequestOptions};

/// Reads the organization the session is scoped to.
pub struct OrganizationClient {
    executor: Arc<RequestExecutor>,
}

impl OrganizationClient {
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// `GET /o/{org}`
    ///
    /// # Errors
    /// Returns the executor's error for a failed call, or
    /// `EdgeError::Serialization` for an unexpected body.
    pub async fn load(&self) -> Result<Organization> {
        let path = self.executor.config().organization_path();
        let organization: Organization =
            self.executor.get(&path, &RequestOptions::new()).await?.json()?;

        debug!(organization = %organization.name, environments = organization.environments.len(), "Loaded organization");
        Ok(organization)
    }

    /// `GET /o/{org}/environments`
    ///
    /// # Errors
    /// See [`OrganizationClient::load`].
    pub async fn list_environments(&self) -> Result<Vec<String>> {
        let path = path::collection_path(self.executor.organization(), "environments");
        self.executor.get(&path, &RequestOptions::new()).await?.json()
    }
}
