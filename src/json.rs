//! JSON conversion of raw inputs and canonical values.
//!
//! JSON has no boxed values, big numbers or wrapped values, so only the
//! shapes it can express are produced: strings, numbers (integers beyond
//! the exact range of a double become big integers), arrays as byte-array
//! candidates, and the `{type, value}` / `{encoding, text}` objects.

use num_bigint::BigInt;
use serde_json::{Map, Value as JsonValue, json};

use crate::value::{BytesValue, DecimalValue, Input};

/// Largest integer a double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

impl Input {
    /// Convert a JSON value into an input.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Input::Null,
            JsonValue::Bool(value) => Input::Bool(*value),
            JsonValue::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    if integer.unsigned_abs() > MAX_SAFE_INTEGER {
                        return Input::BigInt(BigInt::from(integer));
                    }
                } else if let Some(integer) = number.as_u64() {
                    if integer > MAX_SAFE_INTEGER {
                        return Input::BigInt(BigInt::from(integer));
                    }
                }
                number
                    .as_f64()
                    .map_or_else(|| Input::Other(number.to_string()), Input::Number)
            }
            JsonValue::String(text) => Input::String(text.clone()),
            JsonValue::Array(items) => Input::Sequence(items.iter().map(Input::from_json).collect()),
            JsonValue::Object(map) => from_object(map).unwrap_or_else(|| Input::Other(value.to_string())),
        }
    }
}

fn from_object(map: &Map<String, JsonValue>) -> Option<Input> {
    if map.len() != 2 {
        return None;
    }
    if let (Some(JsonValue::String(type_name)), Some(value)) = (map.get("type"), map.get("value")) {
        return Some(Input::type_value(type_name.clone(), Input::from_json(value)));
    }
    if let (Some(JsonValue::String(encoding)), Some(JsonValue::String(text))) =
        (map.get("encoding"), map.get("text"))
    {
        return Some(Input::text(encoding.clone(), text));
    }
    None
}

impl BytesValue {
    /// Render as `{ "type": ..., "kind": "value", "value": "0x..." }`.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "type": self.data_type.to_string(),
            "kind": "value",
            "value": self.payload,
        })
    }
}

impl DecimalValue {
    /// Render as `{ "type": ..., "kind": "value", "value": "<decimal>" }`.
    ///
    /// The decimal is a string so that no precision is lost.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "type": self.data_type.to_string(),
            "kind": "value",
            "value": self.to_plain_string(),
        })
    }
}
