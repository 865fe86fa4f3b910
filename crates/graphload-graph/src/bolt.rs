//! Conversion of JSON values into Bolt parameter values.

use std::collections::HashMap;

use neo4rs::{BoltNull, BoltType};
use serde_json::Value;

/// Convert a JSON value into a Bolt value.
///
/// Integers that do not fit in an `i64` are sent as floats.
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        },
        Value::String(s) => s.clone().into(),
        Value::Array(items) => items.iter().map(json_to_bolt).collect::<Vec<_>>().into(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), json_to_bolt(v)))
            .collect::<HashMap<String, BoltType>>()
            .into(),
    }
}
