#![deny(missing_docs)]

//! # Response Mapping
//!
//! Builds the ordered response list of an endpoint or trait from a
//! status-code keyed response map.

use crate::canon::Response;
use crate::import::example::stringify;
use crate::swagger::document::{RefOr, Response as SwaggerResponse};
use crate::swagger::refs::value_is_trait_reference;
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Inputs shared by every status code of one response map.
#[derive(Debug, Clone, Copy)]
pub struct ResponseContext<'a> {
    /// Drop entries that are trait references instead of inlining them.
    pub skip_trait_refs: bool,
    /// The dereferenced counterpart of the map being mapped.
    pub resolved: Option<&'a IndexMap<String, RefOr<SwaggerResponse>>>,
    /// Pointers to document-level responses materialized as traits.
    pub known_trait_refs: &'a HashSet<String>,
    /// Mime type whose example is kept when examples are keyed by mime type.
    pub mime_type: &'a str,
}

/// Maps every status code of `responses`, in order, to one canonical response.
pub fn map_responses(
    responses: &IndexMap<String, RefOr<SwaggerResponse>>,
    ctx: &ResponseContext<'_>,
) -> Vec<Response> {
    let mut mapped = Vec::with_capacity(responses.len());

    for (code, entry) in responses {
        if let Some(reference) = entry.trait_reference() {
            if ctx.skip_trait_refs
                && (reference.has_trait_marker()
                    || ctx.known_trait_refs.contains(&reference.ref_location))
            {
                tracing::debug!(code = %code, reference = %reference.ref_location, "response is a trait, skipping");
                continue;
            }
        }

        let resolved = ctx
            .resolved
            .and_then(|map| map.get(code))
            .and_then(RefOr::as_inline);

        let (source, body, description) = match entry {
            RefOr::Ref(_) => (
                resolved,
                resolved.and_then(|r| r.schema.clone()),
                resolved.and_then(|r| r.description.clone()),
            ),
            RefOr::T(response) => match &response.schema {
                Some(schema) if value_is_trait_reference(schema) => (
                    Some(response),
                    resolved.and_then(|r| r.schema.clone()),
                    resolved
                        .and_then(|r| r.description.clone())
                        .or_else(|| response.description.clone()),
                ),
                schema => (Some(response), schema.clone(), response.description.clone()),
            },
        };

        let example = source
            .and_then(|r| r.examples.as_ref())
            .and_then(|examples| select_example(examples, ctx.mime_type));

        mapped.push(Response {
            codes: vec![code.clone()],
            body: body.unwrap_or_else(|| json!({})),
            example,
            description,
        });
    }

    mapped
}

/// Picks the example to keep.
///
/// A mapping whose keys are all mime types yields only the entry for
/// `mime_type`; any other non-empty value is kept whole.
pub fn select_example(examples: &Value, mime_type: &str) -> Option<String> {
    match examples {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.keys().all(|k| k.contains('/')) => {
            map.get(mime_type).map(stringify)
        }
        other => Some(stringify(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(value: Value) -> IndexMap<String, RefOr<SwaggerResponse>> {
        serde_json::from_value(value).unwrap()
    }

    fn ctx<'a>(
        resolved: Option<&'a IndexMap<String, RefOr<SwaggerResponse>>>,
        known: &'a HashSet<String>,
    ) -> ResponseContext<'a> {
        ResponseContext {
            skip_trait_refs: true,
            resolved,
            known_trait_refs: known,
            mime_type: "application/json",
        }
    }

    #[test]
    fn test_inline_responses_in_order() {
        let raw = responses(json!({
            "200": {"description": "OK", "schema": {"$ref": "#/definitions/User"}},
            "404": {"description": "Missing"}
        }));
        let known = HashSet::new();

        let mapped = map_responses(&raw, &ctx(None, &known));
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].codes, vec!["200"]);
        assert_eq!(mapped[0].body, json!({"$ref": "#/definitions/User"}));
        assert_eq!(mapped[0].description.as_deref(), Some("OK"));
        assert_eq!(mapped[1].codes, vec!["404"]);
        assert_eq!(mapped[1].body, json!({}));
    }

    #[test]
    fn test_trait_references_are_skipped() {
        let raw = responses(json!({
            "401": {"$ref": "#/responses/trait:secured:401"},
            "500": {"$ref": "#/responses/ServerError"},
            "200": {"description": "OK"}
        }));
        let mut known = HashSet::new();
        known.insert("#/responses/ServerError".to_string());

        let mapped = map_responses(&raw, &ctx(None, &known));
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].codes, vec!["200"]);
    }

    #[test]
    fn test_plain_response_reference_is_resolved() {
        let raw = responses(json!({"404": {"$ref": "#/responses/NotFound"}}));
        let resolved = responses(json!({
            "404": {"description": "Not found", "schema": {"type": "object"}}
        }));
        let known = HashSet::new();

        let mapped = map_responses(&raw, &ctx(Some(&resolved), &known));
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].body, json!({"type": "object"}));
        assert_eq!(mapped[0].description.as_deref(), Some("Not found"));
    }

    #[test]
    fn test_trait_references_kept_when_not_skipping() {
        let raw = responses(json!({"401": {"$ref": "#/responses/trait:secured:401"}}));
        let resolved = responses(json!({"401": {"description": "Unauthorized"}}));
        let known = HashSet::new();
        let context = ResponseContext {
            skip_trait_refs: false,
            ..ctx(Some(&resolved), &known)
        };

        let mapped = map_responses(&raw, &context);
        assert_eq!(mapped[0].description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_examples_by_mime_type() {
        let raw = responses(json!({
            "200": {
                "description": "OK",
                "examples": {
                    "application/xml": "<user/>",
                    "application/json": {"id": 1}
                }
            },
            "201": {
                "description": "Created",
                "examples": {"text/plain": "created"}
            }
        }));
        let known = HashSet::new();

        let mapped = map_responses(&raw, &ctx(None, &known));
        assert_eq!(mapped[0].example.as_deref(), Some("{\n    \"id\": 1\n}"));
        assert_eq!(mapped[1].example, None);
    }

    #[test]
    fn test_select_example_single_value() {
        assert_eq!(
            select_example(&json!({"id": 7}), "application/json").as_deref(),
            Some("{\n    \"id\": 7\n}")
        );
        assert_eq!(select_example(&json!({}), "application/json"), None);
        assert_eq!(select_example(&Value::Null, "application/json"), None);
    }
}
