use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use shelfwatch_core::{InventoryError, InventoryResult};
use shelfwatch_inventory::{evaluate, Classification, Payload};

use crate::app::{dto, errors};
use crate::context::RequestContext;

/// `POST /productos`: classify a product batch.
///
/// Always answers `200` with a [`dto::ServiceEnvelope`]; unreadable bodies and
/// classification failures are reported inside the envelope as
/// `{"error", "message"}`.
pub async fn classify_products(
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let text = match run(body) {
        Ok(result) => serde_json::to_string(&result),
        Err(e) => {
            warn!(request_id = %ctx.request_id(), kind = e.kind(), "classification failed: {e}");
            serde_json::to_string(&errors::inventory_error_body(&e))
        }
    };

    match text {
        Ok(body) => (StatusCode::OK, Json(dto::ServiceEnvelope { body })).into_response(),
        Err(e) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "serialize_error",
            e.to_string(),
        ),
    }
}

fn run(body: Result<Json<Value>, JsonRejection>) -> InventoryResult<Classification> {
    let Json(body) = body.map_err(|rejection| {
        InventoryError::unrecognized(format!("unreadable request body: {}", rejection.body_text()))
    })?;
    let dto::ClassifyRequest {
        productos_json,
        hoy_iso,
    } = dto::ClassifyRequest::from_body(body)?;

    let payload = Payload::try_from(productos_json)?;
    info!(shape = payload.shape(), reference = %hoy_iso, "classification requested");
    evaluate(payload, &hoy_iso)
}
