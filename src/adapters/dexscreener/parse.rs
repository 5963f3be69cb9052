//! Tolerant extraction of list payloads.

use serde_json::Value;

/// Pull the item list out of a list-endpoint response.
///
/// Accepts either a bare array or an object wrapping the array under
/// `field`. Any other shape yields an empty list rather than an error; the
/// upstream API's envelope is not contractually stable.
pub fn extract_list(value: &Value, field: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get(field) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
