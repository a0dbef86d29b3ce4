//! # Dereferencing
//!
//! Produces a copy of a document in which every local `$ref` is replaced by a
//! deep copy of its target.
//!
//! - Sibling keys of a `$ref` are discarded, matching JSON Reference semantics.
//! - A reference that closes a cycle is left in place as a `$ref` object.
//! - Non-local references (other files, URLs) are left in place; no I/O happens here.
//! - The copy may hold at most [`MAX_EXPANDED_NODES`] values. Definitions that
//!   reference each other repeatedly grow exponentially when inlined, so the
//!   walk stops with [`AppError::ExpansionLimit`] instead.

use crate::error::{AppError, AppResult};
use crate::swagger::refs::decode_pointer_segment;
use serde_json::{Map, Value};

/// Largest number of JSON values a dereferenced copy may contain.
pub const MAX_EXPANDED_NODES: usize = 1_000_000;

/// Returns a fully dereferenced copy of `root`.
///
/// Fails with [`AppError::UnresolvedReference`] when a local pointer has no target
/// and with [`AppError::ExpansionLimit`] when the copy outgrows [`MAX_EXPANDED_NODES`].
pub fn dereference(root: &Value) -> AppResult<Value> {
    dereference_within(root, MAX_EXPANDED_NODES)
}

/// [`dereference`] with an explicit node budget.
pub fn dereference_within(root: &Value, max_nodes: usize) -> AppResult<Value> {
    Dereferencer {
        root,
        stack: Vec::new(),
        max_nodes,
        remaining: max_nodes,
    }
    .resolve_node(root)
}

/// Looks up a JSON Pointer fragment (without the leading `#`) in `root`.
pub fn resolve_pointer<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(root);
    }
    let pointer = pointer.strip_prefix('/')?;
    pointer.split('/').try_fold(root, |node, segment| {
        let key = decode_pointer_segment(segment);
        match node {
            Value::Object(map) => map.get(&key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

struct Dereferencer<'a> {
    root: &'a Value,
    /// References currently being inlined, innermost last.
    stack: Vec<String>,
    max_nodes: usize,
    remaining: usize,
}

impl Dereferencer<'_> {
    fn resolve_node(&mut self, node: &Value) -> AppResult<Value> {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .ok_or(AppError::ExpansionLimit(self.max_nodes))?;

        match node {
            Value::Object(map) => {
                if let Some(Value::String(ref_location)) = map.get("$ref") {
                    return self.resolve_reference(ref_location, node);
                }
                let mut resolved = Map::with_capacity(map.len());
                for (key, value) in map {
                    resolved.insert(key.clone(), self.resolve_node(value)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_node(item))
                .collect::<AppResult<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn resolve_reference(&mut self, ref_location: &str, node: &Value) -> AppResult<Value> {
        let Some(pointer) = ref_location.strip_prefix('#') else {
            tracing::debug!(reference = %ref_location, "leaving non-local reference intact");
            return Ok(node.clone());
        };

        if self.stack.iter().any(|seen| seen == ref_location) {
            tracing::debug!(reference = %ref_location, "leaving cyclic reference intact");
            return Ok(node.clone());
        }

        let root = self.root;
        let target = resolve_pointer(root, pointer)
            .ok_or_else(|| AppError::UnresolvedReference(ref_location.to_string()))?;

        self.stack.push(ref_location.to_string());
        let resolved = self.resolve_node(target);
        self.stack.pop();
        resolved
    }
}
