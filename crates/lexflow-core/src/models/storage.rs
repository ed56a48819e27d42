//! Stored object models: what the bucket holds and what an upload produced.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// An object as reported by the storage metadata query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub bucket: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl StoredObject {
    pub fn is_expired(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at < cutoff
    }
}

/// Retention window of `hours`. `None` unless the value is positive and
/// fits in a `TimeDelta`.
pub fn retention_window(hours: i64) -> Option<TimeDelta> {
    if hours <= 0 {
        return None;
    }
    TimeDelta::try_hours(hours)
}

/// A successfully uploaded attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedObject {
    pub path: String,
    pub size: usize,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    /// When the reaper becomes eligible to delete it. Informational only.
    pub expires_at: DateTime<Utc>,
}

impl UploadedObject {
    pub fn new(
        path: String,
        size: usize,
        content_type: String,
        created_at: DateTime<Utc>,
        retention: TimeDelta,
    ) -> Self {
        Self {
            path,
            size,
            content_type,
            created_at,
            expires_at: created_at
                .checked_add_signed(retention)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}
