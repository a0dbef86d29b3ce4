#![deny(missing_docs)]

//! # Body Mapping
//!
//! Builds the request body from `in: body` and `in: formData` parameters.

use crate::canon::RequestBody;
use crate::import::example::hoist_example;
use crate::import::params::{effective_parameters, parameter_field_schema};
use crate::swagger::document::{ParamLocation, Parameter, RefOr};
use serde_json::{json, Map, Value};

/// Returns true if any effective parameter is declared at `location`.
pub fn has_parameter_in(
    params: &[RefOr<Parameter>],
    resolved: Option<&[RefOr<Parameter>]>,
    location: &ParamLocation,
) -> bool {
    effective_parameters(params, resolved, false).any(|p| p.is_in(location))
}

/// Maps the body of an operation.
///
/// - A `body` parameter's schema becomes the body verbatim, minus its hoisted `example`.
/// - Each `formData` parameter becomes one property; required ones are listed in `required`.
/// - The last non-empty description wins.
///
/// Returns `None` when no parameter lives in the body.
pub fn map_request_body(
    params: &[RefOr<Parameter>],
    resolved: Option<&[RefOr<Parameter>]>,
) -> Option<RequestBody> {
    let body_params: Vec<&Parameter> = effective_parameters(params, resolved, false)
        .filter(|p| p.is_in(&ParamLocation::Body) || p.is_in(&ParamLocation::FormData))
        .collect();
    if body_params.is_empty() {
        return None;
    }

    let mut body = json!({"properties": {}, "required": []});
    let mut example = None;
    let mut description = None;

    for param in body_params {
        if param.is_in(&ParamLocation::Body) {
            let mut schema = param.schema.clone().unwrap_or_else(|| json!({}));
            if let Some(hoisted) = hoist_example(&mut schema) {
                example = Some(hoisted);
            }
            body = schema;
        } else if let Some(name) = param.name.as_deref() {
            add_form_field(&mut body, name, parameter_field_schema(param), param.required);
        }

        if let Some(d) = param.description.as_ref().filter(|d| !d.is_empty()) {
            description = Some(d.clone());
        }
    }

    if let Some(map) = body.as_object_mut() {
        if map
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(Vec::is_empty)
        {
            map.shift_remove("required");
        }
    }

    Some(RequestBody {
        body,
        example,
        description,
    })
}

fn add_form_field(body: &mut Value, name: &str, field: Value, required: bool) {
    let Some(map) = body.as_object_mut() else {
        return;
    };

    if let Value::Object(properties) = map
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()))
    {
        properties.insert(name.to_string(), field);
    }

    if required {
        if let Value::Array(list) = map
            .entry("required")
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            let name = Value::String(name.to_string());
            if !list.contains(&name) {
                list.push(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: Value) -> Vec<RefOr<Parameter>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_body_parameters() {
        let list = params(json!([{"name": "q", "in": "query", "type": "string"}]));
        assert!(map_request_body(&list, None).is_none());
    }

    #[test]
    fn test_body_parameter_schema_and_example() {
        let list = params(json!([{
            "name": "user",
            "in": "body",
            "description": "The user to create",
            "schema": {
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "example": {"name": "Ada"}
            }
        }]));

        let body = map_request_body(&list, None).unwrap();
        assert_eq!(
            body.body,
            json!({"type": "object", "properties": {"name": {"type": "string"}}})
        );
        assert_eq!(body.example.as_deref(), Some("{\n    \"name\": \"Ada\"\n}"));
        assert_eq!(body.description.as_deref(), Some("The user to create"));
    }

    #[test]
    fn test_form_data_fields() {
        let list = params(json!([
            {"name": "file", "in": "formData", "type": "file", "required": true, "description": "Upload"},
            {"name": "note", "in": "formData", "type": "string", "description": "Free text"},
            {"name": "id", "in": "path", "type": "string", "required": true}
        ]));

        let body = map_request_body(&list, None).unwrap();
        assert_eq!(
            body.body,
            json!({
                "properties": {
                    "file": {"type": "file", "description": "Upload"},
                    "note": {"type": "string", "description": "Free text"}
                },
                "required": ["file"]
            })
        );
        assert_eq!(body.description.as_deref(), Some("Free text"));
        assert!(body.example.is_none());
    }

    #[test]
    fn test_empty_required_is_dropped() {
        let list = params(json!([{"name": "note", "in": "formData", "type": "string"}]));
        let body = map_request_body(&list, None).unwrap();
        assert_eq!(body.body, json!({"properties": {"note": {"type": "string"}}}));
    }

    #[test]
    fn test_referenced_body_parameter_is_resolved() {
        let raw = params(json!([{"$ref": "#/parameters/trait:payload:body"}]));
        let resolved = params(json!([
            {"name": "payload", "in": "body", "schema": {"$ref": "#/definitions/Payload"}}
        ]));

        assert!(map_request_body(&raw, None).is_none());
        let body = map_request_body(&raw, Some(&resolved)).unwrap();
        assert_eq!(body.body, json!({"$ref": "#/definitions/Payload"}));
        assert!(has_parameter_in(&raw, Some(&resolved), &ParamLocation::Body));
        assert!(!has_parameter_in(&raw, None, &ParamLocation::Body));
    }
}
