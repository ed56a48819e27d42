use thiserror::Error;

/// Failures of the two-step Clio lookup
#[derive(Debug, Error)]
pub enum ClioError {
    #[error("Clio credentials not configured")]
    MissingCredentials,

    #[error("Token request rejected with status {status}")]
    TokenRejected { status: u16, body: String },

    #[error("Matters request rejected with status {status}")]
    MattersRejected { status: u16, body: String },

    #[error("Clio request failed: {0}")]
    Transport(String),

    #[error("Unexpected Clio response: {0}")]
    Decode(String),
}

impl ClioError {
    /// Summary used in the proxy's `error` field.
    pub fn proxy_message(&self) -> &'static str {
        match self {
            ClioError::MissingCredentials => "Clio credentials not configured",
            ClioError::TokenRejected { .. } => "Failed to obtain access token",
            ClioError::MattersRejected { .. } => "Failed to fetch matters",
            ClioError::Transport(_) | ClioError::Decode(_) => "Unexpected error",
        }
    }

    /// Upstream body or error text for the proxy's `details` field.
    pub fn details(&self) -> Option<String> {
        match self {
            ClioError::MissingCredentials => None,
            ClioError::TokenRejected { body, .. } | ClioError::MattersRejected { body, .. } => {
                Some(body.clone())
            }
            ClioError::Transport(msg) | ClioError::Decode(msg) => Some(msg.clone()),
        }
    }
}
