//! Deletes bucket objects older than the retention window, once.
//!
//! Needs `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY`; honors
//! `SUPABASE_BUCKET` and `EXPIRATION_HOURS`. Exits non-zero when the
//! configuration is incomplete or the pass fails.

use anyhow::Context;
use lexflow_core::Config;
use lexflow_infra::init_cli_tracing;
use lexflow_services::{CleanupService, ReapReport, SupabaseStorage};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

async fn run(config: Config) -> anyhow::Result<ReapReport> {
    config.validate().context("Invalid configuration")?;
    let (url, key) = config.storage.require_credentials()?;

    let storage = SupabaseStorage::new(
        url,
        key,
        config.storage_bucket(),
        Duration::from_secs(config.http_timeout_secs()),
    )
    .context("Failed to create storage client")?;

    CleanupService::new(Arc::new(storage), config.expiration_hours())?
        .run()
        .await
        .context("Cleanup failed")
}

#[tokio::main]
async fn main() -> ExitCode {
    init_cli_tracing();

    let result = match Config::from_env() {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!(
                cutoff = %report.cutoff,
                matched = report.matched,
                deleted = report.deleted,
                "Cleanup finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
