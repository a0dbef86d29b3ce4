#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for endpoint identifiers and display text.

use crate::canon::Method;

/// Longest summary kept on an endpoint, in characters.
pub const SUMMARY_MAX_CHARS: usize = 139;

/// Uses the explicit `operationId`, or derives one from the HTTP Method and URL path.
pub fn operation_id(explicit: Option<&str>, method: Method, path: &str) -> String {
    match explicit {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => derive_operation_id(method, path),
    }
}

/// Derives an operation id from the HTTP Method and URL path.
///
/// e.g. `GET /users/{id}` -> `get_users_id`
pub fn derive_operation_id(method: Method, path: &str) -> String {
    let mut clean_path = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_alphanumeric() {
            clean_path.push(c);
        } else if !clean_path.is_empty() && !clean_path.ends_with('_') {
            clean_path.push('_');
        }
    }
    let clean_path = clean_path.trim_end_matches('_');

    if clean_path.is_empty() {
        method.as_str().to_string()
    } else {
        format!("{}_{}", method.as_str(), clean_path)
    }
}

/// Truncates a summary to [`SUMMARY_MAX_CHARS`] characters.
pub fn truncate_summary(summary: &str) -> String {
    summary.chars().take(SUMMARY_MAX_CHARS).collect()
}
