//! Developer entity

use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::status::DeveloperStatus;
use crate::errors::{EdgeError, Result};

/// A developer registered in an organization, addressed by email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub attributes: Attributes,

    /// Assigned by the server on create; `None` marks an unsaved developer.
    #[serde(default, skip_serializing)]
    pub developer_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub status: Option<DeveloperStatus>,
    /// Names of the developer's apps.
    #[serde(default, skip_serializing)]
    pub apps: Vec<String>,
    #[serde(default, skip_serializing)]
    pub companies: Vec<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_modified_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub last_modified_by: Option<String>,
}

impl Developer {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_name: user_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.developer_id.is_none()
    }

    /// Reset every field, used after a successful delete.
    pub fn blank(&mut self) {
        *self = Self::default();
    }

    /// Fields the server requires on save.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("email", &self.email),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("userName", &self.user_name),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(EdgeError::Parameter(format!("developer {field} is required"))),
            None => Ok(()),
        }
    }
}
