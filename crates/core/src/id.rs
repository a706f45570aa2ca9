//! Item identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InventoryError;

/// Opaque identifier of an inventory item within a batch.
///
/// Uniqueness is not enforced: duplicate identifiers share one flag in the
/// batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Read an identifier out of a JSON value.
    ///
    /// Strings are taken verbatim and numbers are rendered in decimal; any
    /// other JSON type carries no usable identifier.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = InventoryError;

    /// Parses a summary-row identifier; a newline would split the row.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(['\r', '\n']) {
            return Err(InventoryError::malformed(
                "identifier",
                "_id",
                format!("{s:?} contains a line break"),
            ));
        }
        Ok(Self(s.to_string()))
    }
}
