use serde::Serialize;
use serde_json::Value;

use shelfwatch_core::{InventoryError, InventoryResult};

pub const PAYLOAD_FIELD: &str = "productosJson";
pub const REFERENCE_FIELD: &str = "hoyISO";

/// Body of `POST /productos`.
///
/// Built by hand from the JSON body so that missing or mistyped fields
/// surface as classification errors in the envelope rather than as bare
/// extractor rejections.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyRequest {
    /// Product payload in any accepted shape (list, text, mapping).
    pub productos_json: Value,
    /// Reference date text.
    pub hoy_iso: String,
}

impl ClassifyRequest {
    /// Missing fields default to `null` / `""`; a non-string reference date is
    /// an [`InventoryError::InvalidReferenceDate`].
    pub fn from_body(body: Value) -> InventoryResult<Self> {
        let Value::Object(mut fields) = body else {
            return Err(InventoryError::unrecognized(format!(
                "request body must be a JSON object with `{PAYLOAD_FIELD}` and `{REFERENCE_FIELD}`"
            )));
        };

        let hoy_iso = match fields.remove(REFERENCE_FIELD) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => return Err(InventoryError::invalid_reference_date(other.to_string())),
        };

        Ok(Self {
            productos_json: fields.remove(PAYLOAD_FIELD).unwrap_or(Value::Null),
            hoy_iso,
        })
    }
}

/// Response envelope: the whole result (or error) serialized as one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEnvelope {
    #[serde(rename = "return")]
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub endpoint: &'static str,
}
