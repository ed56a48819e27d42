//! Lexflow Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! interactive session state machine shared by every Lexflow component.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod shell;
pub mod storage_types;

// Re-export commonly used types
pub use auth::{authenticate, Session};
pub use config::{BaseConfig, ClioConfig, Config, StorageConfig, WebhookConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use shell::{Screen, Shell, ShellEvent, TransitionError};
pub use storage_types::StorageBackend;
