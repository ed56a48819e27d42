//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub storage: String,
    pub bucket: String,
    pub clio: &'static str,
    pub workflows_configured: usize,
}

pub(super) fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
}

/// Liveness probe - process is running.
async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Configuration summary. Never calls the upstream services.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let workflows_configured = state
        .submissions
        .catalog()
        .iter()
        .filter(|w| w.is_configured())
        .count();

    let response = HealthCheckResponse {
        status: "healthy",
        storage: state.storage.backend_type().to_string(),
        bucket: state.storage.bucket().to_string(),
        clio: if state.clio.is_configured() {
            "configured"
        } else {
            "not_configured"
        },
        workflows_configured,
    };

    (StatusCode::OK, Json(response))
}
