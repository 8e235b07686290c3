//! REST API handlers.

pub mod notify;

use axum::Json;
use serde_json::{Value, json};

/// Standard success response.
pub fn ok_json(message: &str) -> Json<Value> {
    Json(json!({ "status": "OK", "message": message }))
}

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> (axum::http::StatusCode, Json<Value>) {
    let code = axum::http::StatusCode::from_u16(status)
        .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    (
        code,
        Json(json!({
            "status": code.canonical_reason().unwrap_or("Error"),
            "message": message,
        })),
    )
}
