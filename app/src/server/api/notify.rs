//! Banner ingestion endpoint.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Query, State};
use serde_json::{Value, json};

use banner_core::request::{parse_flag, parse_scale, parse_ttl};
use banner_core::{BannerPosition, NotificationRequest};

use super::{err_json, ok_json};
use crate::app::SharedState;

type ApiResult = Result<Json<Value>, (axum::http::StatusCode, Json<Value>)>;

/// GET / or /notify?message=...&title=...
///
/// Query pairs arrive in wire order; the first occurrence of a key wins.
pub async fn notify_handler(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult {
    let client_ip = addr.ip().to_string();
    let request = request_from_params(&params, &client_ip);

    tracing::debug!(client = %client_ip, title = %request.title, "notify request");

    if !request.has_message() {
        return Err(err_json(400, "Missing 'message' parameter"));
    }

    state.queue().enqueue(request);
    Ok(ok_json("Notification queued successfully"))
}

/// GET /status — liveness plus queue depth.
pub async fn status_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "queued": state.queue().len(),
    }))
}

/// Build a request from query pairs. Unrecognized keys are ignored; keys
/// are matched case-insensitively and the first occurrence wins.
fn request_from_params(params: &[(String, String)], client_ip: &str) -> NotificationRequest {
    let first = |key: &str| -> Option<&str> {
        params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    };

    let mut request = NotificationRequest::new(first("message").unwrap_or_default());
    request.title = first("title")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Notification from {client_ip}"));
    if let Some(time) = first("time") {
        request.ttl_seconds = parse_ttl(time);
    }
    if let Some(position) = first("position") {
        request.position = BannerPosition::parse(position);
    }
    request.exit_after_show = first("exit").is_some_and(parse_flag);
    request.use_primary_screen = first("primary").is_some_and(parse_flag);
    request.important = first("important").is_some_and(parse_flag);
    request.hints.image = first("image").map(str::to_string);
    request.hints.color = first("color").map(str::to_string);
    request.hints.sound = first("sound").map(str::to_string);
    if let Some(size) = first("size") {
        request.hints.scale_percent = parse_scale(size);
    }
    if let Some(n) = first("max-notifications") {
        // Accepted for wire compatibility; slot capacity comes from config.
        tracing::debug!(value = %n, "ignoring per-request max-notifications");
    }

    request
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builds_request_from_recognized_keys() {
        let params = pairs(&[
            ("message", "build failed"),
            ("title", "CI"),
            ("time", "20"),
            ("position", "bottomcenter"),
            ("important", "true"),
            ("color", "#222222"),
        ]);
        let request = request_from_params(&params, "10.0.0.5");
        assert_eq!(request.message, "build failed");
        assert_eq!(request.title, "CI");
        assert_eq!(request.ttl_seconds, 20);
        assert_eq!(request.position, BannerPosition::BottomCenter);
        assert!(request.important);
        assert!(!request.exit_after_show);
        assert_eq!(request.hints.color.as_deref(), Some("#222222"));
    }

    #[test]
    fn first_occurrence_of_a_key_wins() {
        let params = pairs(&[("message", "first"), ("message", "second")]);
        let request = request_from_params(&params, "10.0.0.5");
        assert_eq!(request.message, "first");
    }

    #[test]
    fn title_defaults_to_client_address() {
        let params = pairs(&[("message", "hi")]);
        let request = request_from_params(&params, "192.168.1.20");
        assert_eq!(request.title, "Notification from 192.168.1.20");
    }

    #[test]
    fn keys_match_case_insensitively() {
        let params = pairs(&[("Message", "hi"), ("TIME", "7")]);
        let request = request_from_params(&params, "10.0.0.5");
        assert_eq!(request.message, "hi");
        assert_eq!(request.ttl_seconds, 7);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let params = pairs(&[
            ("message", "hi"),
            ("time", "soon"),
            ("position", "somewhere"),
            ("important", "yes"),
        ]);
        let request = request_from_params(&params, "10.0.0.5");
        assert_eq!(request.ttl_seconds, 10);
        assert_eq!(request.position, BannerPosition::TopLeft);
        assert!(!request.important);
    }
}
