//! API product entity

use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::status::ApprovalType;
use crate::errors::{EdgeError, Result};

/// Bundle of API resources that keys are granted access to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProduct {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub approval_type: ApprovalType,
    #[serde(default)]
    pub api_resources: Vec<String>,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub proxies: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_time_unit: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default, skip_serializing)]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_modified_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub last_modified_by: Option<String>,
}

impl ApiProduct {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { display_name: name.clone(), name, ..Self::default() }
    }

    /// Products have no server id; one that was never loaded or saved
    /// carries no creation timestamp.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.created_at.is_none()
    }

    pub fn blank(&mut self) {
        *self = Self::default();
    }

    /// # Errors
    /// Returns `EdgeError::Parameter` when the name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EdgeError::Parameter("api product name is required".into()));
        }
        Ok(())
    }
}
