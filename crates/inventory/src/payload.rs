//! Accepted payload shapes.

use serde_json::{Map, Value};

use shelfwatch_core::InventoryError;

/// A product payload, tagged by shape.
///
/// Transports build one of these at their boundary (usually through
/// `TryFrom<Value>`); [`crate::normalize`] maps each variant to its decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An already-structured, ordered list of records.
    Items(Vec<Value>),
    /// Text holding either JSON or a `;`-delimited table.
    Text(String),
    /// A keyed mapping whose values are the records.
    Mapping(Map<String, Value>),
}

impl Payload {
    pub fn shape(&self) -> &'static str {
        match self {
            Payload::Items(_) => "items",
            Payload::Text(_) => "text",
            Payload::Mapping(_) => "mapping",
        }
    }
}

impl TryFrom<Value> for Payload {
    type Error = InventoryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(Payload::Items(items)),
            Value::String(text) => Ok(Payload::Text(text)),
            Value::Object(map) => Ok(Payload::Mapping(map)),
            other => Err(InventoryError::unrecognized(format!(
                "expected a list, text or mapping of products, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
