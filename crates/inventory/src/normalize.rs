//! Payload normalization: every accepted shape becomes an ordered list of records.

use serde_json::Value;
use tracing::debug;

use shelfwatch_core::{InventoryError, InventoryResult};

use crate::delimited;
use crate::payload::{json_kind, Payload};

/// Turn a payload into an ordered list of records.
///
/// - `Items` are returned unchanged.
/// - `Mapping` yields its values in key order (insertion order).
/// - `Text` is decoded as JSON first (list, or mapping values); text that is
///   not valid JSON falls back to the `;`-delimited table decoder.
pub fn normalize(payload: Payload) -> InventoryResult<Vec<Value>> {
    match payload {
        Payload::Items(items) => Ok(items),
        Payload::Mapping(map) => Ok(map.into_iter().map(|(_, v)| v).collect()),
        Payload::Text(text) => decode_text(&text),
    }
}

fn decode_text(text: &str) -> InventoryResult<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(Value::Object(map)) => Ok(map.into_iter().map(|(_, v)| v).collect()),
        Ok(other) => Err(InventoryError::unrecognized(format!(
            "JSON text decoded to {}, expected a list or mapping of products",
            json_kind(&other)
        ))),
        Err(e) => {
            debug!(error = %e, "payload text is not JSON; trying delimited table");
            delimited::decode_table(text)
        }
    }
}
