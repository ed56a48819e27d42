//! Lexflow Storage Library
//!
//! This crate provides the storage abstraction for workflow attachments and
//! its implementations: Supabase Storage for deployments and an in-memory
//! store for local runs and tests.
//!
//! # Storage key format
//!
//! Every backend uses `{workflow-segment}/{epoch-millis}-{filename}`. Keys must
//! not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-supabase")]
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_storage_key;
pub use lexflow_core::StorageBackend;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-supabase")]
pub use supabase::SupabaseStorage;
pub use traits::{Storage, StorageError, StorageResult};
