//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use lexflow_core::Config;
use std::sync::Arc;

/// Validate configuration, start tracing and build the state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    lexflow_infra::init_telemetry("lexflow-api", config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        bucket = %config.storage_bucket(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config)?;
    services::start_cleanup_task(&config, &state);

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
