//! Workflow catalog and server-side submission.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use lexflow_core::models::{workflow_title, WorkflowDefinition, WorkflowField, WorkflowId};
use lexflow_core::AppError;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::AuthenticatedUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_submission;

#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

impl From<&WorkflowField> for FieldSummary {
    fn from(field: &WorkflowField) -> Self {
        Self {
            key: field.key(),
            label: field.label(),
            required: field.is_required(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkflowSummary {
    pub id: WorkflowId,
    pub title: &'static str,
    pub description: &'static str,
    /// Whether a delivery destination is set for this workflow
    pub configured: bool,
    pub fields: Vec<FieldSummary>,
}

impl From<&WorkflowDefinition> for WorkflowSummary {
    fn from(definition: &WorkflowDefinition) -> Self {
        Self {
            id: definition.id,
            title: definition.title,
            description: definition.description,
            configured: definition.is_configured(),
            fields: definition
                .id
                .declared_fields()
                .iter()
                .map(FieldSummary::from)
                .collect(),
        }
    }
}

pub async fn list_workflows(State(state): State<Arc<AppState>>) -> Json<Vec<WorkflowSummary>> {
    Json(
        state
            .submissions
            .catalog()
            .iter()
            .map(WorkflowSummary::from)
            .collect(),
    )
}

/// Upload the attachments and deliver the payload for one workflow form.
///
/// Responds 200 when the destination accepted the payload and 502 when delivery
/// failed; both carry the receipt so the caller sees which files were stored.
pub async fn submit_workflow(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
    Path(workflow_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workflow = state
        .submissions
        .catalog()
        .find(&workflow_id)
        .map(|definition| definition.id)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{} '{}' is not available",
                workflow_title(&workflow_id),
                workflow_id
            ))
        })?;

    let upload = extract_submission(multipart?).await?;

    let receipt = state
        .submissions
        .submit(user.username(), workflow, &upload.form, &upload.attachments)
        .await?;

    let status = if receipt.delivery.is_delivered() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, Json(receipt)))
}
