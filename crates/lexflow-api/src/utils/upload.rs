//! Multipart parsing for workflow submissions.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use lexflow_core::models::{MatterChoice, WorkflowFields, WorkflowForm};
use lexflow_core::AppError;
use lexflow_services::Attachment;

use crate::error::HttpAppError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Form values and files read from one submission request.
#[derive(Debug)]
pub struct SubmissionUpload {
    pub form: WorkflowForm,
    pub attachments: Vec<Attachment>,
}

fn multipart_error(e: MultipartError) -> HttpAppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HttpAppError(AppError::PayloadTooLarge(
            "Attachments exceed the upload limit".to_string(),
        ))
    } else {
        HttpAppError(AppError::InvalidInput(format!(
            "Failed to read multipart field: {}",
            e.body_text()
        )))
    }
}

fn parse_checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

/// Read `matter`, `matterOther`, `notes`, the workflow fields and every file part.
///
/// Parts that carry a file name are treated as attachments whatever their field
/// name; unknown text fields are ignored.
pub async fn extract_submission(
    mut multipart: Multipart,
) -> Result<SubmissionUpload, HttpAppError> {
    let mut matter = String::new();
    let mut matter_other: Option<String> = None;
    let mut notes = String::new();
    let mut fields = WorkflowFields::default();
    let mut attachments = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(filename) = field.file_name().map(str::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            if filename.is_empty() && data.is_empty() {
                // Browsers send an empty part for an untouched file input.
                continue;
            }
            tracing::debug!(
                field = %name,
                filename = %filename,
                size = data.len(),
                "Received attachment"
            );
            attachments.push(Attachment::new(filename, content_type, data));
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "matter" => matter = value,
            "matterOther" => matter_other = Some(value),
            "notes" => notes = value,
            "stowersDemand" => fields.stowers_demand = Some(parse_checkbox(&value)),
            "motionType" => fields.motion_type = Some(value),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    let form = WorkflowForm::new(MatterChoice::from_selection(
        &matter,
        matter_other.as_deref(),
    ))
    .with_notes(notes)
    .with_fields(fields);

    Ok(SubmissionUpload { form, attachments })
}
