// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use chrono::Utc;

/// Liveness probe used by the frontend's keep-alive pings.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
