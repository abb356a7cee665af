//! Credential selection, product diffing and status aggregation
//!
//! Pure functions over domain types. The developer-app client calls these
//! when loading and saving apps; nothing here touches the network.

use std::collections::HashSet;

use edgemgmt_domain::{ApprovalStatus, Credential, DeveloperApp, Result};

/// The credential that currently grants access.
///
/// Among credentials with status `approved` that have not expired at
/// `now_ms` (an `expiresAt` of `-1` never expires), pick the most recently
/// issued. Ties keep the first in wire order.
#[must_use]
pub fn select_active_credential(credentials: &[Credential], now_ms: i64) -> Option<&Credential> {
    credentials
        .iter()
        .filter(|cred| cred.status.eq_ignore_ascii_case(ApprovalStatus::Approved.as_str()))
        .filter(|cred| !cred.is_expired_at(now_ms))
        .fold(None, |best: Option<&Credential>, cred| match best {
            Some(current) if current.issued_at >= cred.issued_at => Some(current),
            _ => Some(cred),
        })
}

/// Products to attach to and detach from a credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDiff {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl ProductDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// `add = new \ old`, `remove = old \ new`.
///
/// Both lists keep the order of their source and collapse duplicates.
#[must_use]
pub fn diff_products<O, N>(old: &[O], new: &[N]) -> ProductDiff
where
    O: AsRef<str>,
    N: AsRef<str>,
{
    let old_set: HashSet<&str> = old.iter().map(AsRef::as_ref).collect();
    let new_set: HashSet<&str> = new.iter().map(AsRef::as_ref).collect();

    ProductDiff {
        add: ordered_difference(new, &old_set),
        remove: ordered_difference(old, &new_set),
    }
}

fn ordered_difference<S: AsRef<str>>(items: &[S], exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !exclude.contains(name) && seen.insert(*name))
        .map(String::from)
        .collect()
}

/// Worst status across an app, its credentials and their products.
///
/// Severity is `approved < pending < revoked`. An app without a status
/// counts as approved.
///
/// # Errors
/// Returns `EdgeError::Parameter` when any status string is unknown.
pub fn aggregate_status(app: &DeveloperApp) -> Result<ApprovalStatus> {
    let mut worst = app.approval_status()?;

    for credential in &app.credentials {
        worst = worst.max(credential.approval_status()?);
        for product in &credential.api_products {
            worst = worst.max(product.approval_status()?);
        }
    }

    Ok(worst)
}
