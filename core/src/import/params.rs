#![deny(missing_docs)]

//! # Parameter Mapping
//!
//! Turns per-location parameter lists into object-typed schemas.
//!
//! Each mapper takes the raw entries of one operation (or path item, or trait
//! bucket) and keeps the ones declared at its own location. Entries that are
//! still `$ref` pointers are either skipped (trait references, when asked to)
//! or replaced by the entry at the same index of the dereferenced list.

use crate::canon::ObjectSchema;
use crate::swagger::document::{ParamLocation, Parameter, RefOr};
use serde_json::{Map, Value};

/// Parameter keys that never describe the value itself.
const NON_SCHEMA_KEYS: &[&str] = &["collectionFormat", "allowEmptyValue"];

/// Maps `in: query` parameters.
pub fn map_query_string(params: &[RefOr<Parameter>], skip_trait_refs: bool) -> ObjectSchema {
    map_location(params, None, &ParamLocation::Query, skip_trait_refs, false)
}

/// Maps `in: header` parameters.
pub fn map_headers(params: &[RefOr<Parameter>], skip_trait_refs: bool) -> ObjectSchema {
    map_location(params, None, &ParamLocation::Header, skip_trait_refs, false)
}

/// Maps `in: path` parameters, substituting `resolved[i]` for unresolved entries.
///
/// Every path parameter is required whatever the source says: a path segment
/// cannot be omitted.
pub fn map_path_params(
    params: &[RefOr<Parameter>],
    resolved: Option<&[RefOr<Parameter>]>,
) -> ObjectSchema {
    map_location(params, resolved, &ParamLocation::Path, false, true)
}

fn map_location(
    params: &[RefOr<Parameter>],
    resolved: Option<&[RefOr<Parameter>]>,
    location: &ParamLocation,
    skip_trait_refs: bool,
    always_required: bool,
) -> ObjectSchema {
    let mut schema = ObjectSchema::default();
    for param in effective_parameters(params, resolved, skip_trait_refs) {
        if !param.is_in(location) {
            continue;
        }
        let Some(name) = param.name.as_deref() else {
            tracing::debug!(location = %location, "skipping parameter without a name");
            continue;
        };
        schema.insert(
            name,
            parameter_field_schema(param),
            always_required || param.required,
        );
    }
    schema
}

/// Yields the inline parameters of `params`, looking unresolved references up
/// by index in `resolved`.
///
/// With `skip_trait_refs`, trait references are dropped before any lookup.
pub(crate) fn effective_parameters<'a>(
    params: &'a [RefOr<Parameter>],
    resolved: Option<&'a [RefOr<Parameter>]>,
    skip_trait_refs: bool,
) -> impl Iterator<Item = &'a Parameter> + 'a {
    params
        .iter()
        .enumerate()
        .filter_map(move |(index, entry)| match entry {
            RefOr::T(param) => Some(param),
            RefOr::Ref(reference) => {
                if skip_trait_refs && reference.is_trait_reference() {
                    return None;
                }
                resolved
                    .and_then(|list| list.get(index))
                    .and_then(RefOr::as_inline)
            }
        })
}

/// Builds the field schema of a single parameter: its description plus every
/// key describing the value (`type`, `format`, `items`, `enum`, bounds, ...).
pub fn parameter_field_schema(param: &Parameter) -> Value {
    let mut field = Map::new();
    for (key, value) in &param.fields {
        if key.starts_with("x-") || NON_SCHEMA_KEYS.contains(&key.as_str()) {
            continue;
        }
        field.insert(key.clone(), value.clone());
    }
    if let Some(description) = param.description.as_ref().filter(|d| !d.is_empty()) {
        field.insert("description".to_string(), Value::String(description.clone()));
    }
    Value::Object(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Vec<RefOr<Parameter>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_query_mapper_filters_location_and_required() {
        let list = params(json!([
            {"name": "limit", "in": "query", "type": "integer", "required": true, "collectionFormat": "csv"},
            {"name": "q", "in": "query", "type": "string", "description": "Search text", "x-internal": true},
            {"name": "id", "in": "path", "type": "string", "required": true},
            {"name": "X-Trace", "in": "header", "type": "string"}
        ]));

        let schema = map_query_string(&list, true);
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.properties["limit"], json!({"type": "integer"}));
        assert_eq!(
            schema.properties["q"],
            json!({"type": "string", "description": "Search text"})
        );
        assert_eq!(schema.required.iter().collect::<Vec<_>>(), vec!["limit"]);
    }

    #[test]
    fn test_header_mapper_skips_trait_references() {
        let list = params(json!([
            {"$ref": "#/parameters/trait:secured:Authorization"},
            {"name": "X-Request-Id", "in": "header", "type": "string", "required": true}
        ]));

        let schema = map_headers(&list, true);
        assert_eq!(schema.properties.keys().collect::<Vec<_>>(), vec!["X-Request-Id"]);
        assert!(schema.required.contains("X-Request-Id"));
    }

    #[test]
    fn test_path_mapper_forces_required_and_substitutes_resolved() {
        let raw = params(json!([
            {"$ref": "#/parameters/userId"},
            {"name": "slug", "in": "path", "type": "string", "required": false}
        ]));
        let resolved = params(json!([
            {"name": "userId", "in": "path", "type": "integer"},
            {"name": "slug", "in": "path", "type": "string", "required": false}
        ]));

        let schema = map_path_params(&raw, Some(&resolved));
        assert_eq!(
            schema.properties.keys().collect::<Vec<_>>(),
            vec!["userId", "slug"]
        );
        assert_eq!(
            schema.required.iter().collect::<Vec<_>>(),
            vec!["userId", "slug"]
        );

        let unresolved = map_path_params(&raw, None);
        assert_eq!(unresolved.properties.keys().collect::<Vec<_>>(), vec!["slug"]);
    }

    #[test]
    fn test_nameless_parameters_are_skipped() {
        let list = params(json!([{"in": "query", "type": "string"}]));
        assert!(map_query_string(&list, false).is_empty());
    }
}
