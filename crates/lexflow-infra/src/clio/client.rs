use lexflow_core::constants::CLIO_MATTERS_SCOPE;
use lexflow_core::models::{Matter, MatterPicklist, MattersPage};
use lexflow_core::ClioConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ClioError;

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    scope: &'static str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Clone)]
struct Credentials {
    client_id: String,
    client_secret: String,
}

/// Client for the Clio active-matters lookup
#[derive(Clone)]
pub struct ClioClient {
    http_client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl ClioClient {
    pub fn new(config: &ClioConfig, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client for Clio: {}", e))?;

        let credentials = config.credentials().map(|(id, secret)| Credentials {
            client_id: id.to_string(),
            client_secret: secret.to_string(),
        });

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn access_token(&self) -> Result<String, ClioError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ClioError::MissingCredentials)?;

        let response = self
            .http_client
            .post(format!("{}/oauth/token", self.base_url))
            .json(&TokenRequest {
                grant_type: "client_credentials",
                client_id: &credentials.client_id,
                client_secret: &credentials.client_secret,
                scope: CLIO_MATTERS_SCOPE,
            })
            .send()
            .await
            .map_err(|e| ClioError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClioError::TokenRejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClioError::Decode(format!("token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Active matters exactly as Clio returned them.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_active_matters_raw(&self) -> Result<serde_json::Value, ClioError> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .get(format!("{}/api/v4/matters", self.base_url))
            .query(&[("states", "active")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClioError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClioError::MattersRejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClioError::Decode(format!("matters response: {}", e)))
    }

    /// Active matters parsed from the `data` array.
    pub async fn fetch_active_matters(&self) -> Result<Vec<Matter>, ClioError> {
        let raw = self.fetch_active_matters_raw().await?;
        let page: MattersPage =
            serde_json::from_value(raw).map_err(|e| ClioError::Decode(e.to_string()))?;
        Ok(page.data)
    }

    /// Populate the picklist. Failures are logged and surface as `Unavailable`.
    pub async fn lookup(&self) -> MatterPicklist {
        match self.fetch_active_matters().await {
            Ok(matters) => {
                tracing::debug!(count = matters.len(), "Loaded active Clio matters");
                MatterPicklist::Loaded(matters)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Matter lookup failed");
                MatterPicklist::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(base_url: &str, with_credentials: bool) -> ClioClient {
        let config = ClioConfig {
            base_url: base_url.to_string(),
            client_id: with_credentials.then(|| "client-id".to_string()),
            client_secret: with_credentials.then(|| "client-secret".to_string()),
        };
        ClioClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn exchanges_token_then_fetches_active_matters() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::Json(serde_json::json!({
                "grant_type": "client_credentials",
                "client_id": "client-id",
                "client_secret": "client-secret",
                "scope": "read:matters"
            })))
            .with_status(200)
            .with_body(r#"{"access_token":"tok-1","token_type":"bearer"}"#)
            .create_async()
            .await;
        let matters = server
            .mock("GET", "/api/v4/matters")
            .match_query(Matcher::UrlEncoded("states".into(), "active".into()))
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body(r#"{"data":[{"id":11,"display_number":"00011-Ng","description":"Ng v. City"}]}"#)
            .create_async()
            .await;

        let result = client(&server.url(), true).fetch_active_matters().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 11);
        assert_eq!(result[0].label(), "00011-Ng - Ng v. City");
        token.assert_async().await;
        matters.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_token_yields_empty_picklist() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(401)
            .with_body("invalid_client")
            .create_async()
            .await;
        let matters = server
            .mock("GET", "/api/v4/matters")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client(&server.url(), true);
        let err = client.fetch_active_matters().await.unwrap_err();
        assert!(matches!(err, ClioError::TokenRejected { status: 401, .. }));

        let picklist = client.lookup().await;
        assert!(picklist.matters().is_empty());
        assert!(!picklist.is_available());
        matters.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_matters_yields_empty_picklist() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"access_token":"tok-1"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v4/matters")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = client(&server.url(), true);
        match client.fetch_active_matters_raw().await {
            Err(ClioError::MattersRejected { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(client.lookup().await.matters().is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_make_no_request() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", "/oauth/token")
            .expect(0)
            .create_async()
            .await;

        let client = client(&server.url(), false);
        assert!(!client.is_configured());
        assert!(matches!(
            client.fetch_active_matters().await,
            Err(ClioError::MissingCredentials)
        ));
        token.assert_async().await;
    }
}
