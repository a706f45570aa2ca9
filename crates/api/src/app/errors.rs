use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};

use shelfwatch_core::InventoryError;

/// Error body carried inside the service envelope.
pub fn inventory_error_body(err: &InventoryError) -> Value {
    json!({
        "error": err.kind(),
        "message": err.to_string(),
    })
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfwatch_core::ItemId;

    #[test]
    fn body_carries_kind_and_message() {
        let err = InventoryError::invalid_lead_time(ItemId::new("A1"), "2.5");
        assert_eq!(
            inventory_error_body(&err),
            json!({"error": "invalid_lead_time", "message": "item A1: invalid lead time 2.5"})
        );
    }
}
