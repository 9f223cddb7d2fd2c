//! Health check handler.

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::responses::ApiResponse;

/// `GET /health` — liveness probe.
pub async fn health_handler() -> impl IntoResponse {
    Json(ApiResponse::success(
        "Service healthy",
        json!({"status": "ok"}),
    ))
}
