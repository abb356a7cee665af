//! Resource path construction
//!
//! Every management path has the shape `/o/{org}/{collection}/{id}/…`.
//! Identifiers are percent-encoded segment by segment, so an organization
//! or entity name containing `/`, spaces or `?` never changes the shape of
//! the path. Dot segments survive encoding and would be collapsed by URL
//! normalization, so identifiers equal to `.` or `..` are refused.

use crate::errors::{EdgeError, Result};

/// Check an identifier before it becomes a path segment.
///
/// # Errors
/// Returns `EdgeError::Parameter` for a blank identifier or a dot segment.
pub fn validate_identifier(id: &str, what: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(EdgeError::Parameter(format!("{what} is required")));
    }
    if id == "." || id == ".." {
        return Err(EdgeError::Parameter(format!("{what} must not be a dot segment: {id:?}")));
    }
    Ok(())
}

/// Percent-encode a single path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Join segments into an absolute path, encoding each one.
#[must_use]
pub fn resource_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().fold(String::new(), |mut path, segment| {
        path.push('/');
        path.push_str(&encode_segment(segment.as_ref()));
        path
    })
}

/// `/o/{org}`
#[must_use]
pub fn organization_path(organization: &str) -> String {
    resource_path(&["o", organization])
}

/// `/o/{org}/{collection}`
#[must_use]
pub fn collection_path(organization: &str, collection: &str) -> String {
    resource_path(&["o", organization, collection])
}

/// `/o/{org}/{collection}/{id}`
#[must_use]
pub fn entity_path(organization: &str, collection: &str, id: &str) -> String {
    resource_path(&["o", organization, collection, id])
}
