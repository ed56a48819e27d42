use anyhow::{Context, Result};
use lexflow_core::models::DeliveryOutcome;
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = "Lexflow-Webhook/1.0";

/// Configuration for webhook delivery
#[derive(Clone, Debug)]
pub struct WebhookDispatcherConfig {
    pub timeout_seconds: u64,
}

impl Default for WebhookDispatcherConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

/// Posts workflow payloads to their n8n destination, once.
#[derive(Clone)]
pub struct WebhookDispatcher {
    http_client: Client,
}

/// Destination must parse as an absolute http(s) URL with a host.
pub fn validate_destination(url: &str) -> Result<Url, String> {
    let parsed = Url::parse(url.trim()).map_err(|e| format!("Invalid webhook URL: {}", e))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "Webhook URL must use http or https, got '{}'",
            parsed.scheme()
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err("Webhook URL must have a host".to_string());
    }

    Ok(parsed)
}

impl WebhookDispatcher {
    pub fn new(config: WebhookDispatcherConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for webhooks")?;

        Ok(Self { http_client })
    }

    /// Deliver `payload` to `destination`.
    ///
    /// A missing, empty or malformed destination fails without any request.
    /// 2xx is `Delivered`; any other status or a transport error is `Failed`.
    #[tracing::instrument(skip(self, payload))]
    pub async fn deliver<T>(&self, destination: Option<&str>, payload: &T) -> DeliveryOutcome
    where
        T: Serialize + ?Sized,
    {
        let Some(destination) = destination.map(str::trim).filter(|s| !s.is_empty()) else {
            tracing::warn!("No webhook configured for workflow");
            return DeliveryOutcome::failed("No webhook URL configured for this workflow");
        };

        let url = match validate_destination(destination) {
            Ok(url) => url,
            Err(reason) => {
                tracing::warn!(error = %reason, "Refusing to deliver webhook");
                return DeliveryOutcome::failed(reason);
            }
        };

        let response = match self
            .http_client
            .post(url)
            .header("User-Agent", USER_AGENT)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Webhook request failed");
                return DeliveryOutcome::failed(format!("Request failed: {}", e));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Webhook delivered");
            return DeliveryOutcome::Delivered {
                status_code: status.as_u16(),
            };
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Failed to read response body"));
        tracing::warn!(status = status.as_u16(), body = %body, "Webhook returned non-2xx status");

        DeliveryOutcome::failed(format!("Webhook returned status {}: {}", status.as_u16(), body))
    }
}
