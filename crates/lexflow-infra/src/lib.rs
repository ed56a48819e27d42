//! Lexflow Infrastructure Library
//!
//! Shared infrastructure used by the API server and the command-line tools:
//! - Middleware (request ID)
//! - Tracing initialization
//! - HTTP error body
//! - Clio matter lookup client
//! - Webhook delivery

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;

#[cfg(feature = "clio")]
pub mod clio;

#[cfg(feature = "webhook")]
pub mod webhook;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_cli_tracing, init_telemetry, shutdown_telemetry};

pub use error::ErrorResponse;

#[cfg(feature = "clio")]
pub use clio::{ClioClient, ClioError};

#[cfg(feature = "webhook")]
pub use webhook::{WebhookDispatcher, WebhookDispatcherConfig};
