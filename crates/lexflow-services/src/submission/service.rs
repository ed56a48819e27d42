use chrono::Utc;
use lexflow_core::models::{
    DeliveryOutcome, UploadedObject, WorkflowCatalog, WorkflowForm, WorkflowId, WorkflowPayload,
};
use lexflow_core::AppError;
use lexflow_infra::WebhookDispatcher;
use serde::Serialize;
use std::sync::Arc;

use crate::upload::{Attachment, AttachmentUploader};

/// What happened to a submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub workflow: WorkflowId,
    pub title: &'static str,
    pub delivery: DeliveryOutcome,
    pub uploaded: Vec<UploadedObject>,
    pub payload: WorkflowPayload,
}

/// Validates a workflow form, uploads its attachments and delivers the payload.
#[derive(Clone)]
pub struct SubmissionService {
    catalog: Arc<WorkflowCatalog>,
    uploader: AttachmentUploader,
    dispatcher: WebhookDispatcher,
}

impl SubmissionService {
    pub fn new(
        catalog: Arc<WorkflowCatalog>,
        uploader: AttachmentUploader,
        dispatcher: WebhookDispatcher,
    ) -> Self {
        Self {
            catalog,
            uploader,
            dispatcher,
        }
    }

    pub fn catalog(&self) -> &WorkflowCatalog {
        &self.catalog
    }

    /// Invalid forms are rejected before anything is uploaded or sent.
    /// Delivery problems are reported in the receipt, not as errors.
    #[tracing::instrument(
        skip(self, form, attachments),
        fields(workflow = %workflow, files = attachments.len())
    )]
    pub async fn submit(
        &self,
        user: &str,
        workflow: WorkflowId,
        form: &WorkflowForm,
        attachments: &[Attachment],
    ) -> Result<SubmissionReceipt, AppError> {
        let mut payload = WorkflowPayload::build(
            workflow,
            form,
            attachments.len(),
            Vec::new(),
            user,
            Utc::now(),
        )?;

        let uploaded = self
            .uploader
            .upload(attachments, workflow.storage_segment())
            .await;
        if uploaded.len() < attachments.len() {
            tracing::warn!(
                selected = attachments.len(),
                uploaded = uploaded.len(),
                "Some attachments were not uploaded"
            );
        }
        payload.files = uploaded.iter().map(|o| o.path.clone()).collect();

        let definition = self.catalog.get(workflow);
        let delivery = self
            .dispatcher
            .deliver(definition.destination_url.as_deref(), &payload)
            .await;

        tracing::info!(delivered = delivery.is_delivered(), "Workflow submitted");

        Ok(SubmissionReceipt {
            workflow,
            title: definition.title,
            delivery,
            uploaded,
            payload,
        })
    }
}
