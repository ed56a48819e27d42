use axum::Json;
use lexflow_core::{AppError, Session};
use serde::{Deserialize, Serialize};

use crate::error::{HttpAppError, ValidatedJson};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub authenticated: bool,
    pub username: String,
}

/// Check a credential pair. No token is issued.
pub async fn login(
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpAppError> {
    let session = Session::open(&request.username, &request.password).ok_or_else(|| {
        AppError::Unauthorized("Invalid credentials. Please try again.".to_string())
    })?;

    tracing::info!(username = %session.username(), "User signed in");

    Ok(Json(LoginResponse {
        authenticated: true,
        username: session.username().to_string(),
    }))
}
