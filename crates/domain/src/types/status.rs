//! Wire-level status enums

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Approval state shared by apps, credentials and credential products.
///
/// Variant order is the severity order used when aggregating statuses:
/// `Approved < Pending < Revoked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Approved,
    Pending,
    Revoked,
}

impl_domain_status_conversions!(ApprovalStatus {
    Approved => "approved",
    Pending => "pending",
    Revoked => "revoked",
});

impl ApprovalStatus {
    /// Severity rank: approved=0, pending=1, revoked=2.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Approved => 0,
            Self::Pending => 1,
            Self::Revoked => 2,
        }
    }

    /// Query-string `action` that moves an app or key into this status.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Approved => "approve",
            Self::Pending => "pending",
            Self::Revoked => "revoke",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeveloperStatus {
    Active,
    Inactive,
}

impl_domain_status_conversions!(DeveloperStatus {
    Active => "active",
    Inactive => "inactive",
});

impl DeveloperStatus {
    /// Query-string `action` that moves a developer into this status.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// How keys requesting an API product get approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalType {
    #[default]
    Auto,
    Manual,
}

impl_domain_status_conversions!(ApprovalType {
    Auto => "auto",
    Manual => "manual",
});
