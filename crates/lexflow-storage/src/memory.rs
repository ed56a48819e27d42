use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use lexflow_core::models::StoredObject;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MemoryObject {
    data: Bytes,
    content_type: String,
    created_at: DateTime<Utc>,
}

/// In-process storage used for local runs and tests
#[derive(Clone, Default)]
pub struct MemoryStorage {
    bucket: String,
    objects: Arc<RwLock<BTreeMap<String, MemoryObject>>>,
}

impl MemoryStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::default(),
        }
    }

    /// Insert an object with an explicit creation time.
    pub async fn insert_at(&self, storage_key: &str, data: Bytes, created_at: DateTime<Utc>) {
        self.objects.write().await.insert(
            storage_key.to_string(),
            MemoryObject {
                data,
                content_type: "application/octet-stream".to_string(),
                created_at,
            },
        );
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    pub async fn get(&self, storage_key: &str) -> Option<(Bytes, String)> {
        self.objects
            .read()
            .await
            .get(storage_key)
            .map(|o| (o.data.clone(), o.content_type.clone()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;

        let mut objects = self.objects.write().await;
        if objects.contains_key(storage_key) {
            return Err(StorageError::UploadFailed(format!(
                "Object already exists: {}",
                storage_key
            )));
        }

        objects.insert(
            storage_key.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(storage_key.to_string())
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(storage_key);
        Ok(())
    }

    async fn delete_many(&self, storage_keys: &[String]) -> StorageResult<usize> {
        let mut objects = self.objects.write().await;
        Ok(storage_keys
            .iter()
            .filter(|key| objects.remove(key.as_str()).is_some())
            .count())
    }

    async fn list_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StorageResult<Vec<StoredObject>> {
        Ok(self
            .objects
            .read()
            .await
            .iter()
            .filter(|(_, o)| o.created_at < cutoff)
            .map(|(key, o)| StoredObject {
                bucket: self.bucket.clone(),
                path: key.clone(),
                created_at: o.created_at,
            })
            .collect())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
