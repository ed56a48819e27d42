use bytes::Bytes;
use chrono::{TimeDelta, Utc};
use lexflow_core::models::{retention_window, UploadedObject};
use lexflow_storage::{generate_storage_key, Storage, StorageError, StorageResult};
use std::sync::Arc;

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Uploads attachments under `{segment}/{epoch_millis}-{filename}`
#[derive(Clone)]
pub struct AttachmentUploader {
    storage: Arc<dyn Storage>,
    retention: TimeDelta,
}

impl AttachmentUploader {
    pub fn new(storage: Arc<dyn Storage>, expiration_hours: i64) -> StorageResult<Self> {
        let retention = retention_window(expiration_hours).ok_or_else(|| {
            StorageError::ConfigError(format!(
                "EXPIRATION_HOURS must be a positive number of hours, got {}",
                expiration_hours
            ))
        })?;
        Ok(Self { storage, retention })
    }

    /// Upload each file once. Failed files are logged and left out of the result.
    #[tracing::instrument(skip(self, files), fields(segment = %segment, count = files.len()))]
    pub async fn upload(&self, files: &[Attachment], segment: &str) -> Vec<UploadedObject> {
        let mut uploaded = Vec::with_capacity(files.len());

        for file in files {
            let now = Utc::now();
            let key = match generate_storage_key(segment, now.timestamp_millis(), &file.filename) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(filename = %file.filename, error = %e, "Skipping attachment");
                    continue;
                }
            };

            match self
                .storage
                .upload_with_key(&key, file.data.clone(), &file.content_type)
                .await
            {
                Ok(path) => {
                    tracing::debug!(path = %path, size = file.data.len(), "Attachment uploaded");
                    uploaded.push(UploadedObject::new(
                        path,
                        file.data.len(),
                        file.content_type.clone(),
                        now,
                        self.retention,
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        filename = %file.filename,
                        storage_key = %key,
                        error = %e,
                        "Attachment upload failed"
                    );
                }
            }
        }

        uploaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use lexflow_core::models::StoredObject;
    use lexflow_storage::{MemoryStorage, StorageBackend, StorageError, StorageResult};

    /// Rejects any key whose file name starts with "bad".
    struct FlakyStorage {
        inner: MemoryStorage,
    }

    #[async_trait]
    impl Storage for FlakyStorage {
        async fn upload_with_key(
            &self,
            storage_key: &str,
            data: Bytes,
            content_type: &str,
        ) -> StorageResult<String> {
            let name = storage_key.rsplit('/').next().unwrap_or_default();
            if name.split_once('-').map_or(false, |(_, n)| n.starts_with("bad")) {
                return Err(StorageError::UploadFailed("status 500".to_string()));
            }
            self.inner
                .upload_with_key(storage_key, data, content_type)
                .await
        }

        async fn delete(&self, storage_key: &str) -> StorageResult<()> {
            self.inner.delete(storage_key).await
        }

        async fn delete_many(&self, storage_keys: &[String]) -> StorageResult<usize> {
            self.inner.delete_many(storage_keys).await
        }

        async fn list_created_before(
            &self,
            cutoff: DateTime<Utc>,
        ) -> StorageResult<Vec<StoredObject>> {
            self.inner.list_created_before(cutoff).await
        }

        fn bucket(&self) -> &str {
            self.inner.bucket()
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Memory
        }
    }

    fn file(name: &str) -> Attachment {
        Attachment::new(name, "application/pdf", Bytes::from(name.as_bytes().to_vec()))
    }

    #[tokio::test]
    async fn uploads_under_workflow_segment() {
        let storage = MemoryStorage::new("documents");
        let uploader = AttachmentUploader::new(Arc::new(storage.clone()), 24).unwrap();

        let uploaded = uploader.upload(&[file("intake.pdf")], "motion").await;

        assert_eq!(uploaded.len(), 1);
        let path = &uploaded[0].path;
        assert!(path.starts_with("motion/"));
        assert!(path.ends_with("-intake.pdf"));
        let millis = path
            .trim_start_matches("motion/")
            .trim_end_matches("-intake.pdf");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(
            uploaded[0].expires_at - uploaded[0].created_at,
            TimeDelta::hours(24)
        );
        assert_eq!(storage.keys().await, vec![path.clone()]);
    }

    #[tokio::test]
    async fn failed_file_is_excluded_alone() {
        let flaky = FlakyStorage {
            inner: MemoryStorage::new("documents"),
        };
        let uploader = AttachmentUploader::new(Arc::new(flaky), 24).unwrap();

        let uploaded = uploader
            .upload(
                &[file("a.pdf"), file("bad.pdf"), file("c.pdf"), file("..")],
                "petition",
            )
            .await;

        assert_eq!(uploaded.len(), 2);
        assert!(uploaded[0].path.ends_with("-a.pdf"));
        assert!(uploaded[1].path.ends_with("-c.pdf"));
    }

    #[tokio::test]
    async fn no_files_no_paths() {
        let uploader =
            AttachmentUploader::new(Arc::new(MemoryStorage::new("documents")), 24).unwrap();
        assert!(uploader.upload(&[], "affidavit").await.is_empty());
    }

    #[test]
    fn non_positive_retention_is_rejected() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new("documents"));
        assert!(AttachmentUploader::new(storage.clone(), 0).is_err());
        assert!(AttachmentUploader::new(storage, -24).is_err());
    }
}
