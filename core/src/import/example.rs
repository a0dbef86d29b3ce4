//! # Examples
//!
//! Examples are carried as pretty-printed JSON text next to the schema they
//! were taken from.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Serializes `value` as JSON with 4-space indentation.
pub fn stringify(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Removes a top-level `example` from a schema object and returns it stringified.
///
/// Blank examples (`null`, `false`, `0`, `""`) are not hoisted and stay in the schema.
pub fn hoist_example(schema: &mut Value) -> Option<String> {
    let map = schema.as_object_mut()?;
    if !map.get("example").is_some_and(is_filled) {
        return None;
    }
    map.shift_remove("example").map(|example| stringify(&example))
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
