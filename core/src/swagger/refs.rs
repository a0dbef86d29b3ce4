#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Classifies `$ref` pointers and parses the `trait:` naming convention.
//!
//! A reference whose path crosses a `parameters` or `responses` segment marks a
//! reusable fragment (a *trait reference*) rather than an ordinary schema
//! reference. Trait names are encoded either in the last pointer segment of such a
//! reference (`#/parameters/trait:paged:limit`) or in the key of a document-level
//! entry (`trait:paged:query:limit`, `trait:notFound:404`).

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const TRAIT_PREFIX: &str = "trait";

/// Status code used for trait responses whose key carries no explicit code.
pub const DEFAULT_TRAIT_CODE: &str = "200";

fn trait_section_regex() -> &'static Regex {
    static TRAIT_SECTION_RE: OnceLock<Regex> = OnceLock::new();
    TRAIT_SECTION_RE
        .get_or_init(|| Regex::new(r"(?i)/(parameters|responses)/").expect("Invalid regex"))
}

/// Returns true if the pointer targets a `parameters` or `responses` section.
pub fn is_trait_reference(ref_location: &str) -> bool {
    trait_section_regex().is_match(ref_location)
}

/// Returns true if an arbitrary JSON value is an object carrying a trait reference.
///
/// Used for subtrees that are kept as raw JSON (e.g. a response `schema`).
pub fn value_is_trait_reference(value: &Value) -> bool {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .is_some_and(is_trait_reference)
}

/// Returns true if the reference path names a `trait:` qualified entry.
pub fn has_trait_marker(ref_location: &str) -> bool {
    ref_location.contains(TRAIT_PREFIX)
}

/// Structured form of a trait name found in a reference or an entry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitDescriptor {
    /// Trait name shared by every fragment of the same trait.
    pub name: String,
    /// Status code (responses only, explicit `trait:<name>:<code>` form).
    pub code: Option<String>,
}

impl TraitDescriptor {
    /// Parses a document-level `parameters` key.
    ///
    /// `trait:<name>[:...]` yields `<name>`; any other key is its own trait name.
    pub fn from_parameter_key(key: &str) -> Self {
        let name = split_qualified(key).map_or_else(|| key.to_string(), |(name, _)| name);
        Self { name, code: None }
    }

    /// Parses a document-level `responses` key.
    ///
    /// `trait:<name>:<code>` yields both parts; `trait:<name>` and plain keys carry
    /// no code, see [`TraitDescriptor::code_or_default`].
    pub fn from_response_key(key: &str) -> Self {
        let (name, code) = split_qualified(key).unwrap_or_else(|| (key.to_string(), None));
        Self { name, code }
    }

    /// Parses a trait reference pointer.
    ///
    /// Returns `None` when the pointer is not a trait reference.
    pub fn from_reference(ref_location: &str) -> Option<Self> {
        let captures = trait_section_regex().captures(ref_location)?;
        let in_responses = captures[1].eq_ignore_ascii_case("responses");
        let segment = decode_pointer_segment(ref_location.rsplit('/').next()?);
        let (name, code) = split_qualified(&segment).unwrap_or_else(|| {
            let name = segment.split(':').next().unwrap_or_default();
            (name.to_string(), None)
        });
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            code: code.filter(|_| in_responses),
        })
    }

    /// The status code this fragment applies to.
    pub fn code_or_default(&self) -> &str {
        self.code.as_deref().unwrap_or(DEFAULT_TRAIT_CODE)
    }
}

/// Splits `trait:<name>[:<code>]` into its name and optional code.
///
/// Returns `None` for keys without the `trait:` qualifier.
fn split_qualified(key: &str) -> Option<(String, Option<String>)> {
    let parts: Vec<&str> = key.split(':').collect();
    match parts.as_slice() {
        [TRAIT_PREFIX, name, rest @ ..] if !name.is_empty() => {
            let code = match rest {
                [code] if !code.is_empty() => Some((*code).to_string()),
                _ => None,
            };
            Some((name.to_string(), code))
        }
        _ => None,
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
