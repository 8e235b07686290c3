use axum::http::{HeaderValue, header};
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use super::api;
use crate::app::SharedState;

/// Create the axum router with all routes. Every exchange closes its
/// connection; senders are expected to fire one request and go away.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(api::notify::notify_handler))
        .route("/notify", get(api::notify::notify_handler))
        .route("/status", get(api::notify::status_handler))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::CONNECTION,
            HeaderValue::from_static("close"),
        ))
        .with_state(state)
}

async fn method_not_allowed() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    api::err_json(405, "Method not allowed")
}
