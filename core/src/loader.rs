#![deny(missing_docs)]

//! # Document Loading
//!
//! The load phase of a conversion pass: decode text, check the version,
//! dereference, and type both copies of the document.
//!
//! This is the only fallible phase. Retrieval (files, URLs) is left to callers.

use crate::error::{AppError, AppResult};
use crate::swagger::deref::dereference;
use crate::swagger::document::SwaggerDocument;
use serde_json::{Map, Number, Value};

/// Options for the load phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Use the dereferenced document as the raw document too.
    ///
    /// With this set no reference survives into the mapping pass, so no trait
    /// is detected on endpoints and every reusable fragment is inlined.
    pub expand: bool,
}

/// The two parallel views of one source document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The document with internal references intact.
    pub raw: SwaggerDocument,
    /// The same document with every local reference resolved.
    pub dereferenced: SwaggerDocument,
}

/// Loads a document from JSON or YAML text.
pub fn load_str(text: &str, options: &LoadOptions) -> AppResult<LoadedDocument> {
    load_value(parse_text(text)?, options)
}

/// Loads an already decoded document tree.
pub fn load_value(value: Value, options: &LoadOptions) -> AppResult<LoadedDocument> {
    validate_root(&value)?;

    let resolved = dereference(&value)?;
    let dereferenced = SwaggerDocument::from_value(resolved)?;
    let raw = if options.expand {
        dereferenced.clone()
    } else {
        SwaggerDocument::from_value(value)?
    };

    Ok(LoadedDocument { raw, dereferenced })
}

/// Decodes text as JSON, falling back to YAML.
pub fn parse_text(text: &str) -> AppResult<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            tracing::debug!(error = %json_err, "input is not JSON, trying YAML");
            let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
            yaml_to_json(yaml)
        }
    }
}

/// Converts a YAML tree into JSON.
///
/// Scalar mapping keys are stringified, so unquoted status codes (`200:`) and
/// boolean-looking keys survive as strings.
pub fn yaml_to_json(value: serde_yaml::Value) -> AppResult<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<AppResult<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> AppResult<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Number(i.into()));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::Number(u.into()));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| AppError::General(format!("Unrepresentable number in YAML: {}", n)))
}

fn yaml_key(key: serde_yaml::Value) -> AppResult<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(AppError::General(format!(
            "Unsupported YAML mapping key: {:?}",
            other
        ))),
    }
}

/// Checks the `swagger` version and the presence of `info`.
fn validate_root(value: &Value) -> AppResult<()> {
    let root = value
        .as_object()
        .ok_or_else(|| AppError::General("Invalid document: root must be an object".into()))?;

    let version = match root.get("swagger") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(AppError::UnsupportedVersion(format!(
                "invalid 'swagger' field: {}",
                other
            )))
        }
        None if root.contains_key("openapi") => {
            return Err(AppError::UnsupportedVersion(
                "OpenAPI 3.x documents are not supported; expected Swagger 2.0".into(),
            ))
        }
        None => {
            return Err(AppError::UnsupportedVersion(
                "missing 'swagger' version field".into(),
            ))
        }
    };

    if !version.starts_with("2.") {
        return Err(AppError::UnsupportedVersion(format!(
            "Swagger {}; only 2.x is supported",
            version
        )));
    }

    if !root.get("info").is_some_and(Value::is_object) {
        return Err(AppError::General(
            "Invalid document: missing 'info' object".into(),
        ));
    }

    Ok(())
}
