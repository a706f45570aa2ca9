//! Error model shared by normalization and classification.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the inventory layer.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Every variant aborts the whole batch: callers never see partial results,
/// only the first failure encountered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The payload is not one of the accepted shapes.
    #[error("unrecognized payload format: {0}")]
    UnrecognizedFormat(String),

    /// A field could not be decoded (JSON sub-field, table row, identifier).
    ///
    /// `location` names where the field lives (`row 3`, `item A1`, ...).
    #[error("malformed field `{field}` at {location}: {reason}")]
    MalformedField {
        location: String,
        field: String,
        reason: String,
    },

    #[error("invalid reference date {0:?}")]
    InvalidReferenceDate(String),

    #[error("item {item}: invalid expiration date {value:?}")]
    InvalidExpirationDate { item: ItemId, value: String },

    /// Lead time was negative, fractional or not a number.
    #[error("item {item}: invalid lead time {value}")]
    InvalidLeadTime { item: ItemId, value: String },
}

impl InventoryError {
    pub fn unrecognized(msg: impl Into<String>) -> Self {
        Self::UnrecognizedFormat(msg.into())
    }

    pub fn malformed(
        location: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedField {
            location: location.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_reference_date(raw: impl Into<String>) -> Self {
        Self::InvalidReferenceDate(raw.into())
    }

    pub fn invalid_expiration(item: ItemId, value: impl Into<String>) -> Self {
        Self::InvalidExpirationDate {
            item,
            value: value.into(),
        }
    }

    pub fn invalid_lead_time(item: ItemId, value: impl Into<String>) -> Self {
        Self::InvalidLeadTime {
            item,
            value: value.into(),
        }
    }

    /// Stable machine-readable code, used by transports in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnrecognizedFormat(_) => "unrecognized_format",
            Self::MalformedField { .. } => "malformed_field",
            Self::InvalidReferenceDate(_) => "invalid_reference_date",
            Self::InvalidExpirationDate { .. } => "invalid_expiration_date",
            Self::InvalidLeadTime { .. } => "invalid_lead_time",
        }
    }
}
