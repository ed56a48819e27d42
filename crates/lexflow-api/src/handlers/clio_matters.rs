//! `/api/clio-matters`: server-side proxy that keeps Clio credentials off the client.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lexflow_infra::ErrorResponse;
use std::sync::Arc;

use crate::state::AppState;

/// Relay Clio's active-matters document unchanged, or a 500 `{error, details?}`.
pub async fn list_clio_matters(State(state): State<Arc<AppState>>) -> Response {
    match state.clio.fetch_active_matters_raw().await {
        Ok(matters) => (StatusCode::OK, Json(matters)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Clio matter lookup failed");
            let mut body = ErrorResponse::new(e.proxy_message());
            if let Some(details) = e.details() {
                body = body.with_details(details);
            }
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
