//! Terminal front end for the intranet: an interactive session driven by the
//! shell state machine, plus one-shot helpers shared by the `lexflow` binary.

pub mod files;
pub mod interactive;

use anyhow::Context;
use lexflow_core::models::WorkflowCatalog;
use lexflow_core::Config;
use lexflow_infra::ClioClient;
use lexflow_services::{
    create_storage, AttachmentUploader, SubmissionService, WebhookDispatcher,
    WebhookDispatcherConfig,
};
use std::sync::Arc;
use std::time::Duration;

/// Clients the terminal commands work with.
#[derive(Clone)]
pub struct Services {
    pub clio: ClioClient,
    pub submissions: SubmissionService,
}

impl Services {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs());

        let storage =
            create_storage(&config.storage, timeout).context("Failed to initialize storage")?;
        let uploader = AttachmentUploader::new(storage, config.expiration_hours())?;
        let dispatcher = WebhookDispatcher::new(WebhookDispatcherConfig {
            timeout_seconds: config.http_timeout_secs(),
        })?;
        let catalog = Arc::new(WorkflowCatalog::from_config(&config.webhooks));

        Ok(Self {
            clio: ClioClient::new(&config.clio, timeout)?,
            submissions: SubmissionService::new(catalog, uploader, dispatcher),
        })
    }
}

/// Shorten to `max_len` characters, ending in "..." when cut.
pub fn truncate_label(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
