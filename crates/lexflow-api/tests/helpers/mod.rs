//! Test helpers: build the router over in-memory storage.
//!
//! Run from the workspace root: `cargo test -p lexflow-api`.

#![allow(dead_code)]

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use lexflow_api::constants;
use lexflow_api::setup::{routes, services};
use lexflow_api::state::AppState;
use lexflow_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// `Authorization` value for the given pair.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Every object currently in the bucket.
    pub async fn stored_keys(&self) -> Vec<String> {
        self.state
            .storage
            .list_created_before(Utc::now() + Duration::hours(1))
            .await
            .expect("memory listing")
            .into_iter()
            .map(|o| o.path)
            .collect()
    }
}

/// Config from defaults plus `vars`; storage always in memory.
pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.insert("STORAGE_BACKEND".to_string(), "memory".to_string());
    env.insert("HTTP_TIMEOUT_SECS".to_string(), "5".to_string());

    Config::from_lookup(|key| env.get(key).cloned()).expect("test config")
}

pub fn spawn_app(vars: &[(&str, &str)]) -> TestApp {
    let config = test_config(vars);
    let state = services::initialize_services(&config).expect("Failed to build services");
    let app = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, state }
}
