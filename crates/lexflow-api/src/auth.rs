//! HTTP Basic credentials checked against the credential gate.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lexflow_core::{AppError, Session};

use crate::error::HttpAppError;

const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Session opened from the request's `Authorization: Basic` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Session);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        self.0.username()
    }
}

fn unauthorized(message: &str) -> HttpAppError {
    HttpAppError(AppError::Unauthorized(message.to_string()))
}

/// Split a Basic `Authorization` value into username and password.
pub fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?.trim();
    let decoded = STANDARD.decode(encoded).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing credentials"))?;

        let (username, password) =
            decode_basic(header_value).ok_or_else(|| unauthorized("Malformed credentials"))?;

        match Session::open(&username, &password) {
            Some(session) => Ok(AuthenticatedUser(session)),
            None => {
                tracing::debug!(username = %username, "Rejected credentials");
                Err(unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}
