//! Constants shared across crates.

/// Bucket used when `SUPABASE_BUCKET` is not set.
pub const DEFAULT_BUCKET: &str = "documents";

/// Retention window for uploaded attachments when `EXPIRATION_HOURS` is not set.
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

pub const DEFAULT_CLIO_BASE_URL: &str = "https://app.clio.com";

/// Scope requested in the Clio client-credentials grant.
pub const CLIO_MATTERS_SCOPE: &str = "read:matters";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// 25 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Title shown for a workflow id that is not in the catalog.
pub const FALLBACK_WORKFLOW_TITLE: &str = "Legal Workflow";

/// Value of the matter selector that switches to the free-text alternative.
pub const OTHER_MATTER: &str = "other";
