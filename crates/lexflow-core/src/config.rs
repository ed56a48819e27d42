//! Configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file). Parsing goes through a lookup function so tests can supply a
//! plain map instead of mutating the process environment.

use std::collections::BTreeMap;
use std::env;

use crate::constants::{
    DEFAULT_BUCKET, DEFAULT_CLIO_BASE_URL, DEFAULT_EXPIRATION_HOURS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SERVER_PORT,
};
use crate::models::{retention_window, WorkflowId};
use crate::storage_types::StorageBackend;
use crate::AppError;

/// Server-wide settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Timeout applied to every outbound HTTP client
    pub http_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

/// Clio credentials and host
#[derive(Clone, Debug)]
pub struct ClioConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Object storage settings shared by the uploader and the reaper
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub bucket: String,
    pub expiration_hours: i64,
    /// Interval of the in-process reaper. 0 = disabled.
    pub cleanup_interval_secs: u64,
}

/// n8n destinations per workflow
#[derive(Clone, Debug, Default)]
pub struct WebhookConfig {
    pub base_url: Option<String>,
    /// Explicit destination keyed by workflow id (`demand-letter`, ...)
    pub overrides: BTreeMap<String, String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub clio: ClioConfig,
    pub storage: StorageConfig,
    pub webhooks: WebhookConfig,
}

impl ClioConfig {
    /// Both halves of the client-credentials pair, when configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Some((id, secret)),
            _ => None,
        }
    }
}

impl StorageConfig {
    /// URL and service key, or a configuration error naming what is missing.
    pub fn require_credentials(&self) -> Result<(&str, &str), AppError> {
        let url = self.url.as_deref().filter(|s| !s.is_empty());
        let key = self.service_key.as_deref().filter(|s| !s.is_empty());
        match (url, key) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(AppError::Config(
                "Missing SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY".to_string(),
            )),
        }
    }
}

impl WebhookConfig {
    /// Destination URL for a workflow: explicit override first, then `{base}/webhook/{id}`.
    pub fn destination_for(&self, workflow: WorkflowId) -> Option<String> {
        if let Some(url) = self
            .overrides
            .get(workflow.as_str())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            return Some(url.to_string());
        }

        self.base_url
            .as_deref()
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map(|base| format!("{}/webhook/{}", base, workflow.as_str()))
    }
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: parse_or(&get, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            environment,
            cors_origins,
            http_timeout_secs: parse_or(&get, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        let clio = ClioConfig {
            base_url: get("CLIO_BASE_URL").unwrap_or_else(|| DEFAULT_CLIO_BASE_URL.to_string()),
            client_id: get("CLIO_CLIENT_ID"),
            client_secret: get("CLIO_CLIENT_SECRET"),
        };

        let backend = match get("STORAGE_BACKEND") {
            Some(s) => s.parse::<StorageBackend>()?,
            None => StorageBackend::Supabase,
        };

        let storage = StorageConfig {
            backend,
            url: get("SUPABASE_URL"),
            service_key: get("SUPABASE_SERVICE_ROLE_KEY"),
            bucket: get("SUPABASE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            expiration_hours: parse_or(&get, "EXPIRATION_HOURS", DEFAULT_EXPIRATION_HOURS)?,
            cleanup_interval_secs: parse_or(&get, "CLEANUP_INTERVAL_SECS", 0)?,
        };

        let overrides = WorkflowId::ALL
            .iter()
            .filter_map(|id| get(&id.env_key()).map(|url| (id.as_str().to_string(), url)))
            .collect();

        let webhooks = WebhookConfig {
            base_url: get("N8N_BASE_URL"),
            overrides,
        };

        Ok(Config {
            base,
            clio,
            storage,
            webhooks,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!("HTTP_TIMEOUT_SECS must be greater than 0"));
        }

        if self.storage.expiration_hours <= 0 {
            return Err(anyhow::anyhow!("EXPIRATION_HOURS must be greater than 0"));
        }

        if retention_window(self.storage.expiration_hours).is_none() {
            return Err(anyhow::anyhow!(
                "EXPIRATION_HOURS is too large: {}",
                self.storage.expiration_hours
            ));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("SUPABASE_BUCKET cannot be empty"));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn http_timeout_secs(&self) -> u64 {
        self.base.http_timeout_secs
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.base.max_upload_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn storage_bucket(&self) -> &str {
        &self.storage.bucket
    }

    pub fn expiration_hours(&self) -> i64 {
        self.storage.expiration_hours
    }

    pub fn cleanup_interval_secs(&self) -> u64 {
        self.storage.cleanup_interval_secs
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 3000);
        assert_eq!(config.storage_bucket(), "documents");
        assert_eq!(config.expiration_hours(), 24);
        assert_eq!(config.cleanup_interval_secs(), 0);
        assert_eq!(config.storage_backend(), StorageBackend::Supabase);
        assert_eq!(config.clio.base_url, "https://app.clio.com");
        assert!(config.clio.credentials().is_none());
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn storage_credentials_are_required_together() {
        let config = config_from(&[("SUPABASE_URL", "https://x.supabase.co")]).unwrap();
        let err = config.storage.require_credentials().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));

        let config = config_from(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ])
        .unwrap();
        assert_eq!(
            config.storage.require_credentials().unwrap(),
            ("https://x.supabase.co", "service")
        );
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = config_from(&[("EXPIRATION_HOURS", "a day")]).unwrap_err();
        assert!(err.to_string().contains("EXPIRATION_HOURS"));
    }

    #[test]
    fn webhook_override_wins_over_base_url() {
        let config = config_from(&[
            ("N8N_BASE_URL", "https://n8n.internal/"),
            ("N8N_WEBHOOK_MOTION", "https://hooks.example.com/motion-intake"),
        ])
        .unwrap();

        assert_eq!(
            config.webhooks.destination_for(WorkflowId::Motion).as_deref(),
            Some("https://hooks.example.com/motion-intake")
        );
        assert_eq!(
            config
                .webhooks
                .destination_for(WorkflowId::DemandLetter)
                .as_deref(),
            Some("https://n8n.internal/webhook/demand-letter")
        );
    }

    #[test]
    fn webhook_destination_absent_without_configuration() {
        let config = config_from(&[("N8N_WEBHOOK_AFFIDAVIT", "  ")]).unwrap();
        assert!(config
            .webhooks
            .destination_for(WorkflowId::Affidavit)
            .is_none());
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let config = config_from(&[("ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }

    #[test]
    fn retention_must_be_positive_and_bounded() {
        for hours in ["0", "-1", "9223372036854775807"] {
            let config = config_from(&[("EXPIRATION_HOURS", hours)]).unwrap();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("EXPIRATION_HOURS"), "{}", hours);
        }
        assert!(config_from(&[("EXPIRATION_HOURS", "72")])
            .unwrap()
            .validate()
            .is_ok());
    }
}
