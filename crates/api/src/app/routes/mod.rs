use axum::{
    routing::{get, post},
    Router,
};

pub mod products;
pub mod system;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::info))
        .route("/health", get(system::health))
        .route("/productos", post(products::classify_products))
}
