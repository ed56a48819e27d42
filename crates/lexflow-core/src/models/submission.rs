//! Workflow form input and the webhook payload built from it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::constants::OTHER_MATTER;
use crate::models::{WorkflowField, WorkflowId};
use crate::AppError;

/// Matter selector value: a picklist entry, or the free-text alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatterChoice {
    Listed(String),
    Other(String),
}

impl MatterChoice {
    /// Interpret a selector value; `"other"` switches to the free-text field.
    pub fn from_selection(selected: &str, other_text: Option<&str>) -> Self {
        if selected == OTHER_MATTER {
            MatterChoice::Other(other_text.unwrap_or_default().to_string())
        } else {
            MatterChoice::Listed(selected.to_string())
        }
    }

    /// The value sent as `matter`. Blank values are rejected.
    pub fn resolve(&self) -> Result<&str, AppError> {
        match self {
            MatterChoice::Listed(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(AppError::InvalidInput("Matter is required".to_string()));
                }
                Ok(value)
            }
            MatterChoice::Other(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(AppError::InvalidInput(
                        "Describe the matter when \"other\" is selected".to_string(),
                    ));
                }
                Ok(value)
            }
        }
    }
}

/// Workflow-specific inputs. Only those the workflow declares are forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowFields {
    pub stowers_demand: Option<bool>,
    pub motion_type: Option<String>,
}

/// Everything the user typed into a workflow form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowForm {
    pub matter: MatterChoice,
    pub notes: String,
    pub fields: WorkflowFields,
}

impl WorkflowForm {
    pub fn new(matter: MatterChoice) -> Self {
        Self {
            matter,
            notes: String::new(),
            fields: WorkflowFields::default(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_fields(mut self, fields: WorkflowFields) -> Self {
        self.fields = fields;
        self
    }
}

/// JSON body posted to the workflow destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPayload {
    pub workflow_type: WorkflowId,
    pub matter: String,
    pub notes: String,
    /// Number of files the user selected
    pub file_count: usize,
    /// Storage paths of the files that were actually uploaded
    pub files: Vec<String>,
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stowers_demand: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_type: Option<String>,
}

impl WorkflowPayload {
    /// Validate the form and assemble the payload for `workflow`.
    pub fn build(
        workflow: WorkflowId,
        form: &WorkflowForm,
        file_count: usize,
        files: Vec<String>,
        user: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let matter = form.matter.resolve()?.to_string();

        let stowers_demand = workflow
            .declares(WorkflowField::StowersDemand)
            .then(|| form.fields.stowers_demand.unwrap_or(false));

        let motion_type = if workflow.declares(WorkflowField::MotionType) {
            let value = form
                .fields
                .motion_type
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::InvalidInput("Motion type is required".to_string()))?;
            Some(value.to_string())
        } else {
            None
        };

        Ok(Self {
            workflow_type: workflow,
            matter,
            notes: form.notes.clone(),
            file_count,
            files,
            timestamp,
            user: user.to_string(),
            stowers_demand,
            motion_type,
        })
    }
}

fn iso_millis<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
