#[cfg(feature = "storage-memory")]
use crate::MemoryStorage;
#[cfg(feature = "storage-supabase")]
use crate::SupabaseStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use lexflow_core::StorageConfig;
use std::sync::Arc;
use std::time::Duration;

/// Create a storage backend based on configuration
pub fn create_storage(
    config: &StorageConfig,
    timeout: Duration,
) -> StorageResult<Arc<dyn Storage>> {
    match config.backend {
        #[cfg(feature = "storage-supabase")]
        StorageBackend::Supabase => {
            let (url, key) = config
                .require_credentials()
                .map_err(|e| StorageError::ConfigError(e.to_string()))?;

            let storage = SupabaseStorage::new(url, key, config.bucket.clone(), timeout)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-supabase"))]
        StorageBackend::Supabase => Err(StorageError::ConfigError(
            "Supabase storage backend not available (storage-supabase feature not enabled)"
                .to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; attachments are lost on restart");
            Ok(Arc::new(MemoryStorage::new(config.bucket.clone())))
        }

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)".to_string(),
        )),
    }
}
