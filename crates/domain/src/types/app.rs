//! Developer apps and their credentials

use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::status::ApprovalStatus;
use crate::constants::CREDENTIAL_NEVER_EXPIRES;
use crate::errors::{EdgeError, Result};

/// An app owned by a developer.
///
/// `api_products` is only sent on create; afterwards product membership
/// lives on the app's credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperApp {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_products: Vec<String>,
    /// Lifetime in milliseconds of the key generated on create; `-1` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_expires_in: Option<i64>,
    /// Raw wire status ("approved", "revoked", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing)]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub developer_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub credentials: Vec<Credential>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_modified_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub last_modified_by: Option<String>,
}

impl DeveloperApp {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.app_id.is_none()
    }

    pub fn blank(&mut self) {
        *self = Self::default();
    }

    /// Parsed app status; an absent status counts as approved.
    ///
    /// # Errors
    /// Returns `EdgeError::Parameter` for a status string outside the known set.
    pub fn approval_status(&self) -> Result<ApprovalStatus> {
        self.status.as_deref().map_or(Ok(ApprovalStatus::Approved), str::parse)
    }

    /// # Errors
    /// Returns `EdgeError::Parameter` when the name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EdgeError::Parameter("app name is required".into()));
        }
        Ok(())
    }
}

/// One consumer key/secret pair of an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub api_products: Vec<CredentialProduct>,
    /// Unix millis; `-1` never expires.
    #[serde(default = "never_expires")]
    pub expires_at: i64,
    /// Unix millis.
    #[serde(default)]
    pub issued_at: i64,
    pub status: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Credential {
    /// # Errors
    /// Returns `EdgeError::Parameter` for an unknown status string.
    pub fn approval_status(&self) -> Result<ApprovalStatus> {
        self.status.parse()
    }

    /// Whether the credential has expired at `now_ms`.
    #[must_use]
    pub const fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at != CREDENTIAL_NEVER_EXPIRES && self.expires_at <= now_ms
    }

    /// Product names in wire order.
    pub fn product_names(&self) -> impl Iterator<Item = &str> {
        self.api_products.iter().map(|p| p.apiproduct.as_str())
    }
}

const fn never_expires() -> i64 {
    CREDENTIAL_NEVER_EXPIRES
}

/// Product membership of a credential with its own approval state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProduct {
    pub apiproduct: String,
    pub status: String,
}

impl CredentialProduct {
    /// # Errors
    /// Returns `EdgeError::Parameter` for an unknown status string.
    pub fn approval_status(&self) -> Result<ApprovalStatus> {
        self.status.parse()
    }
}
