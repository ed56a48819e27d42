use lexflow_core::Config;
use lexflow_infra::ClioClient;
use lexflow_services::{Storage, SubmissionService};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub clio: ClioClient,
    pub storage: Arc<dyn Storage>,
    pub submissions: SubmissionService,
}
