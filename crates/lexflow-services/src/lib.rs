//! Lexflow Services Layer
//!
//! This crate is the business service layer: attachment upload, the
//! expired-object reaper and workflow submission orchestration. It re-exports
//! the storage and delivery types those services are built from so the API
//! and CLI crates depend on a single facade. Keep coordination here; keep thin
//! HTTP and terminal handling in the binaries.

pub mod cleanup;
pub mod submission;
pub mod upload;

pub use cleanup::{CleanupService, ReapReport};
pub use lexflow_infra::{WebhookDispatcher, WebhookDispatcherConfig};
pub use lexflow_storage::{
    create_storage, MemoryStorage, Storage, StorageBackend, StorageError, StorageResult,
    SupabaseStorage,
};
pub use submission::{SubmissionReceipt, SubmissionService};
pub use upload::{Attachment, AttachmentUploader};
