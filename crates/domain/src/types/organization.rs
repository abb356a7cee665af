//! Organization entity

use serde::{Deserialize, Serialize};

use super::attributes::Attribute;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Organization type, e.g. "paid" or "trial".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub properties: OrganizationProperties,

    #[serde(default, skip_serializing)]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_modified_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub last_modified_by: Option<String>,
}

impl Organization {
    /// Value of an organization property such as `features.isMonetizationEnabled`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .property
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// Wire shape `{"property": [{"name": .., "value": ..}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProperties {
    #[serde(default)]
    pub property: Vec<Attribute>,
}
