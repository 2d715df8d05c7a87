use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::FormError;
use crate::tree::{FormNode, NodeValue};

/// Convert a tree to a JSON value: nil is `null`, scalars are strings,
/// lists are arrays and maps are objects.
pub fn to_value(node: &FormNode) -> Value {
    match node.value() {
        NodeValue::Nil => Value::Null,
        NodeValue::Scalar(s) => Value::String(s.clone()),
        NodeValue::List(items) => Value::Array(items.iter().map(to_value).collect()),
        NodeValue::Map(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_value(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Serialize to compact JSON.
pub fn to_json(node: &FormNode) -> String {
    to_value(node).to_string()
}

/// Serialize to pretty-printed JSON (2-space indent).
pub fn to_json_pretty(node: &FormNode) -> String {
    serde_json::to_string_pretty(&to_value(node)).unwrap_or_default()
}

/// Serialize a flattened `label -> text` mapping as a pretty JSON object.
pub fn flat_to_json_pretty(flat: &BTreeMap<String, String>) -> String {
    serde_json::to_string_pretty(flat).unwrap_or_default()
}

/// Serialize diagnostics as a JSON array of `{code, message}` objects.
pub fn errors_to_json(errors: &[FormError]) -> String {
    let entries: Vec<Value> = errors
        .iter()
        .map(|err| {
            serde_json::json!({
                "code": err.code(),
                "message": err.to_string(),
            })
        })
        .collect();
    Value::Array(entries).to_string()
}

impl FormNode {
    pub fn to_json(&self) -> String {
        to_json(self)
    }

    pub fn to_json_pretty(&self) -> String {
        to_json_pretty(self)
    }
}
