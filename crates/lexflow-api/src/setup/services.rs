//! Service construction from configuration.

use crate::state::AppState;
use anyhow::{Context, Result};
use lexflow_core::models::WorkflowCatalog;
use lexflow_core::Config;
use lexflow_infra::ClioClient;
use lexflow_services::{
    create_storage, AttachmentUploader, CleanupService, SubmissionService, WebhookDispatcher,
    WebhookDispatcherConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let timeout = Duration::from_secs(config.http_timeout_secs());

    let storage =
        create_storage(&config.storage, timeout).context("Failed to initialize storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %storage.bucket(),
        "Storage initialized"
    );

    let clio = ClioClient::new(&config.clio, timeout)?;
    if !clio.is_configured() {
        tracing::warn!("CLIO_CLIENT_ID/CLIO_CLIENT_SECRET not set; matter lookup will fail");
    }

    let catalog = Arc::new(WorkflowCatalog::from_config(&config.webhooks));
    let configured = catalog.iter().filter(|w| w.is_configured()).count();
    tracing::info!(
        workflows = catalog.len(),
        configured,
        "Workflow catalog loaded"
    );

    let dispatcher = WebhookDispatcher::new(WebhookDispatcherConfig {
        timeout_seconds: config.http_timeout_secs(),
    })?;
    let uploader = AttachmentUploader::new(storage.clone(), config.expiration_hours())
        .context("Invalid retention window")?;

    Ok(Arc::new(AppState {
        config: config.clone(),
        clio,
        storage,
        submissions: SubmissionService::new(catalog, uploader, dispatcher),
    }))
}

/// Start the in-process reaper when `CLEANUP_INTERVAL_SECS` is non-zero.
pub fn start_cleanup_task(config: &Config, state: &AppState) -> Option<JoinHandle<()>> {
    let every = config.cleanup_interval_secs();
    if every == 0 {
        tracing::debug!("Scheduled cleanup disabled");
        return None;
    }

    tracing::info!(
        interval_secs = every,
        expiration_hours = config.expiration_hours(),
        "Scheduled cleanup enabled"
    );
    let reaper = match CleanupService::new(state.storage.clone(), config.expiration_hours()) {
        Ok(reaper) => Arc::new(reaper),
        Err(e) => {
            tracing::error!(error = %e, "Scheduled cleanup not started");
            return None;
        }
    };
    Some(reaper.start(Duration::from_secs(every)))
}
