//! # Mime Type Lists
//!
//! Endpoint `consumes`/`produces` lists only carry what the document defaults
//! do not already declare. Lists are handled as ordered sets.

use indexmap::IndexSet;

/// Preferred type when a list carries no better candidate.
pub const APPLICATION_JSON: &str = "application/json";

/// Implied by a `formData` parameter.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Unions `lists` in order, dropping duplicates and every entry of `defaults`.
pub fn without_defaults<'a, I>(lists: I, defaults: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let defaults: IndexSet<&str> = defaults.iter().map(String::as_str).collect();
    lists
        .into_iter()
        .filter(|mime| !defaults.contains(mime))
        .map(str::to_string)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Picks `application/json` if listed, otherwise the first entry.
pub fn preferred_mime_type(types: &[String]) -> Option<&str> {
    types
        .iter()
        .find(|t| t.as_str() == APPLICATION_JSON)
        .or_else(|| types.first())
        .map(String::as_str)
}
