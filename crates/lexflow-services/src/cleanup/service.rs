use chrono::{DateTime, TimeDelta, Utc};
use lexflow_core::models::retention_window;
use lexflow_storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;
use tokio::time::interval;

/// Outcome of one reaper pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReapReport {
    pub cutoff: DateTime<Utc>,
    pub matched: usize,
    pub deleted: usize,
}

/// Deletes bucket objects older than the retention window.
///
/// Expiry is recomputed from the current time on every pass, so repeated
/// runs are harmless.
#[derive(Clone)]
pub struct CleanupService {
    storage: Arc<dyn Storage>,
    retention: TimeDelta,
}

impl CleanupService {
    /// Fails unless `expiration_hours` is a positive, representable window.
    pub fn new(storage: Arc<dyn Storage>, expiration_hours: i64) -> StorageResult<Self> {
        let retention = retention_window(expiration_hours).ok_or_else(|| {
            StorageError::ConfigError(format!(
                "EXPIRATION_HOURS must be a positive number of hours, got {}",
                expiration_hours
            ))
        })?;
        Ok(Self { storage, retention })
    }

    pub fn cutoff(&self, now: DateTime<Utc>) -> StorageResult<DateTime<Utc>> {
        now.checked_sub_signed(self.retention).ok_or_else(|| {
            StorageError::ConfigError(format!(
                "Retention of {} hours reaches before the earliest supported time",
                self.retention.num_hours()
            ))
        })
    }

    /// Start the background reaper running every `every`.
    /// Returns a JoinHandle for graceful shutdown
    pub fn start(self: Arc<Self>, every: std::time::Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut cleanup_interval = interval(every);

            loop {
                cleanup_interval.tick().await;

                tracing::info!("Starting scheduled cleanup of expired files");

                if let Err(e) = self.run().await {
                    tracing::error!(error = %e, "Cleanup task failed");
                }
            }
        })
    }

    pub async fn run(&self) -> StorageResult<ReapReport> {
        self.run_once(Utc::now()).await
    }

    /// One pass: list objects created before `now - retention`, delete them in one batch.
    #[tracing::instrument(skip(self), fields(bucket = %self.storage.bucket()))]
    pub async fn run_once(&self, now: DateTime<Utc>) -> StorageResult<ReapReport> {
        let cutoff = self.cutoff(now)?;

        let expired = self
            .storage
            .list_created_before(cutoff)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching expired objects"))?;

        if expired.is_empty() {
            tracing::info!(cutoff = %cutoff, "No expired files to delete");
            return Ok(ReapReport {
                cutoff,
                matched: 0,
                deleted: 0,
            });
        }

        let paths: Vec<String> = expired.into_iter().map(|o| o.path).collect();
        let deleted = self
            .storage
            .delete_many(&paths)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, count = paths.len(), "Failed to delete files")
            })?;

        tracing::info!(
            cutoff = %cutoff,
            matched = paths.len(),
            deleted,
            "Deleted {} expired files",
            deleted
        );

        Ok(ReapReport {
            cutoff,
            matched: paths.len(),
            deleted,
        })
    }
}
