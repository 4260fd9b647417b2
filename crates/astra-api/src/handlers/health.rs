//! Liveness endpoints.

use axum::{response::IntoResponse, Json};

use astra_core::defaults::SERVICE_NAME;

/// Root liveness message.
#[utoipa::path(get, path = "/", tag = "System",
    responses((status = 200, description = "Service is running")))]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": format!("{} is running", SERVICE_NAME),
        "status": "healthy",
    }))
}

/// Health check.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is healthy")))]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}
