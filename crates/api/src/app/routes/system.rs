use axum::{http::StatusCode, Json};

use crate::app::dto::ServiceInfo;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "ok",
        service: "shelfwatch",
        endpoint: "/productos",
    })
}
