//! # Schema Extraction
//!
//! Turns `definitions` into named [`Schema`] entities.

use crate::canon::Schema;
use crate::import::example::hoist_example;
use indexmap::IndexMap;
use serde_json::Value;

/// Maps every named definition, in document order.
pub fn map_schemas(definitions: &IndexMap<String, Value>) -> Vec<Schema> {
    definitions
        .iter()
        .map(|(key, definition)| map_schema(key, definition))
        .collect()
}

/// Maps one definition.
///
/// The `title`, when it is a string, names the schema and is removed from the
/// definition. A top-level `example` is hoisted.
pub fn map_schema(key: &str, definition: &Value) -> Schema {
    let mut definition = definition.clone();
    strip_extensions(&mut definition);

    let title = definition.as_object_mut().and_then(|map| {
        if map.get("title").is_some_and(Value::is_string) {
            map.shift_remove("title")
        } else {
            None
        }
    });
    let name = match title {
        Some(Value::String(title)) if !title.is_empty() => title,
        _ => key.to_string(),
    };

    let example = hoist_example(&mut definition);

    Schema {
        name,
        definition,
        example,
    }
}

/// Removes `x-` keys at every depth, so no extension survives anywhere in
/// the retained definition.
pub fn strip_extensions(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            map.retain(|key, _| !key.starts_with("x-"));
            map.values_mut().for_each(strip_extensions);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_extensions),
        _ => {}
    }
}
