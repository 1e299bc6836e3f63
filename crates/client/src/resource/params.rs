//! Collection query parameter serialization.
//!
//! Rules, applied to each declared parameter in declaration order:
//! - `null` produces no parameter at all
//! - arrays are joined into one comma-separated value (`null` items skipped)
//! - objects are flattened into `field[subkey]=value` pairs, skipping `null` sub-values
//! - strings, numbers and booleans are sent as their plain text form

use serde_json::Value;

/// Serialize declared parameters into query pairs.
pub fn serialize_params(params: &[(&'static str, Value)]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (name, value) in params {
        match value {
            Value::Null => {}
            Value::Object(entries) => {
                for (subkey, subvalue) in entries {
                    if let Some(text) = scalar_text(subvalue) {
                        pairs.push((format!("{}[{}]", name, subkey), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((name.to_string(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
