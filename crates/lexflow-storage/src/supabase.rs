use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use lexflow_core::models::StoredObject;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Supabase Storage implementation
///
/// Objects go through the storage REST API; the expiry query reads
/// `storage.objects` through PostgREST with the service-role key.
#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct ObjectRow {
    name: String,
    created_at: DateTime<Utc>,
}

impl SupabaseStorage {
    /// Create a new SupabaseStorage instance
    ///
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://abcd.supabase.co")
    /// * `service_key` - Service-role key used for both `apikey` and bearer auth
    /// * `bucket` - Bucket every operation targets
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        bucket: impl Into<String>,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            bucket: bucket.into(),
        })
    }

    fn object_url(&self, storage_key: &str) -> String {
        let encoded: Vec<String> = storage_key
            .split('/')
            .map(|part| urlencoding::encode(part).into_owned())
            .collect();
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            encoded.join("/")
        )
    }

    fn bucket_url(&self) -> String {
        format!("{}/storage/v1/object/{}", self.base_url, self.bucket)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }
}

async fn failure_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("status {}: {}", status, body)
}

#[async_trait]
impl Storage for SupabaseStorage {
    #[tracing::instrument(skip(self, data), fields(bucket = %self.bucket, size = data.len()))]
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;

        let response = self
            .authorized(self.client.put(self.object_url(storage_key)))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::UploadFailed(failure_body(response).await));
        }

        tracing::debug!(storage_key = %storage_key, "Object uploaded");
        Ok(storage_key.to_string())
    }

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        validate_key(storage_key)?;

        let response = self
            .authorized(self.client.delete(self.object_url(storage_key)))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => {
                tracing::debug!(storage_key = %storage_key, "Object already gone");
                Ok(())
            }
            _ => Err(StorageError::DeleteFailed(failure_body(response).await)),
        }
    }

    #[tracing::instrument(
        skip(self, storage_keys),
        fields(bucket = %self.bucket, count = storage_keys.len())
    )]
    async fn delete_many(&self, storage_keys: &[String]) -> StorageResult<usize> {
        if storage_keys.is_empty() {
            return Ok(0);
        }

        let response = self
            .authorized(self.client.delete(self.bucket_url()))
            .json(&serde_json::json!({ "prefixes": storage_keys }))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::DeleteFailed(failure_body(response).await));
        }

        // The API echoes the removed objects; fall back to the request size if the body is odd.
        let removed = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map(|objects| objects.len())
            .unwrap_or(storage_keys.len());

        Ok(removed)
    }

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn list_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StorageResult<Vec<StoredObject>> {
        let cutoff_iso = cutoff.to_rfc3339_opts(SecondsFormat::Millis, true);

        let response = self
            .authorized(self.client.get(format!("{}/rest/v1/objects", self.base_url)))
            .header("Accept-Profile", "storage")
            .query(&[
                ("select", "name,created_at".to_string()),
                ("bucket_id", format!("eq.{}", self.bucket)),
                ("created_at", format!("lt.{}", cutoff_iso)),
            ])
            .send()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::ListFailed(failure_body(response).await));
        }

        let rows: Vec<ObjectRow> = response
            .json()
            .await
            .map_err(|e| StorageError::ListFailed(format!("Unexpected response: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| StoredObject {
                bucket: self.bucket.clone(),
                path: row.name,
                created_at: row.created_at,
            })
            .collect())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Supabase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;

    fn storage(url: &str) -> SupabaseStorage {
        SupabaseStorage::new(url, "service-key", "documents", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn upload_puts_bytes_without_upsert() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/storage/v1/object/documents/motion/1-brief.pdf")
            .match_header("authorization", "Bearer service-key")
            .match_header("apikey", "service-key")
            .match_header("content-type", "application/pdf")
            .match_header("x-upsert", "false")
            .match_body("pdf-bytes")
            .with_status(200)
            .with_body(r#"{"Key":"documents/motion/1-brief.pdf"}"#)
            .create_async()
            .await;

        let key = storage(&server.url())
            .upload_with_key(
                "motion/1-brief.pdf",
                Bytes::from_static(b"pdf-bytes"),
                "application/pdf",
            )
            .await
            .unwrap();

        assert_eq!(key, "motion/1-brief.pdf");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_conflict_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/storage/v1/object/documents/motion/1-a.txt")
            .with_status(409)
            .with_body("Duplicate")
            .create_async()
            .await;

        let err = storage(&server.url())
            .upload_with_key("motion/1-a.txt", Bytes::from_static(b"a"), "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(ref m) if m.contains("409")));
    }

    #[tokio::test]
    async fn lists_expired_rows_for_bucket() {
        let mut server = mockito::Server::new_async().await;
        let cutoff = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let mock = server
            .mock("GET", "/rest/v1/objects")
            .match_header("accept-profile", "storage")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "name,created_at".into()),
                Matcher::UrlEncoded("bucket_id".into(), "eq.documents".into()),
                Matcher::UrlEncoded("created_at".into(), "lt.2025-01-02T00:00:00.000Z".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[{"name":"motion/1-a.pdf","created_at":"2025-01-01T08:00:00.123456+00:00"}]"#,
            )
            .create_async()
            .await;

        let objects = storage(&server.url())
            .list_created_before(cutoff)
            .await
            .unwrap();

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].path, "motion/1-a.pdf");
        assert_eq!(objects[0].bucket, "documents");
        assert!(objects[0].is_expired(cutoff));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn batch_delete_sends_prefixes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/storage/v1/object/documents")
            .match_body(Matcher::Json(
                serde_json::json!({"prefixes": ["motion/1-a.pdf", "petition/2-b.pdf"]}),
            ))
            .with_status(200)
            .with_body(r#"[{"name":"motion/1-a.pdf"},{"name":"petition/2-b.pdf"}]"#)
            .create_async()
            .await;

        let removed = storage(&server.url())
            .delete_many(&["motion/1-a.pdf".to_string(), "petition/2-b.pdf".to_string()])
            .await
            .unwrap();

        assert_eq!(removed, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn batch_delete_of_nothing_makes_no_request() {
        let server = mockito::Server::new_async().await;
        let removed = storage(&server.url()).delete_many(&[]).await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn deleting_missing_object_is_tolerated() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/storage/v1/object/documents/motion/1-a.pdf")
            .with_status(404)
            .create_async()
            .await;

        storage(&server.url())
            .delete("motion/1-a.pdf")
            .await
            .unwrap();
    }
}
