//! Workflow catalog
//!
//! The intranet offers a fixed set of document-generation workflows. Each has
//! a display title, a short description and at most one n8n destination,
//! resolved from configuration at startup.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::config::WebhookConfig;
use crate::constants::FALLBACK_WORKFLOW_TITLE;

/// Workflow identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowId {
    DemandLetter,
    Petition,
    Motion,
    Response,
    DiscoveryRequests,
    DiscoveryResponse,
    SettlementLetter,
    Affidavit,
    EstatePlanning,
}

/// Optional inputs a workflow may declare beyond the common form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowField {
    /// Checkbox: the demand is a Stowers demand
    StowersDemand,
    /// Free text: kind of motion to draft
    MotionType,
}

impl WorkflowField {
    /// Key used in forms and in the webhook payload.
    pub fn key(&self) -> &'static str {
        match self {
            WorkflowField::StowersDemand => "stowersDemand",
            WorkflowField::MotionType => "motionType",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkflowField::StowersDemand => "Stowers demand",
            WorkflowField::MotionType => "Motion type",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, WorkflowField::MotionType)
    }
}

impl WorkflowId {
    pub const ALL: [WorkflowId; 9] = [
        WorkflowId::DemandLetter,
        WorkflowId::Petition,
        WorkflowId::Motion,
        WorkflowId::Response,
        WorkflowId::DiscoveryRequests,
        WorkflowId::DiscoveryResponse,
        WorkflowId::SettlementLetter,
        WorkflowId::Affidavit,
        WorkflowId::EstatePlanning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowId::DemandLetter => "demand-letter",
            WorkflowId::Petition => "petition",
            WorkflowId::Motion => "motion",
            WorkflowId::Response => "response",
            WorkflowId::DiscoveryRequests => "discovery-requests",
            WorkflowId::DiscoveryResponse => "discovery-response",
            WorkflowId::SettlementLetter => "settlement-letter",
            WorkflowId::Affidavit => "affidavit",
            WorkflowId::EstatePlanning => "estate-planning",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WorkflowId::DemandLetter => "Draft a Demand Letter",
            WorkflowId::Petition => "Draft a Petition",
            WorkflowId::Motion => "Draft a Motion",
            WorkflowId::Response => "Draft a Response",
            WorkflowId::DiscoveryRequests => "Discovery Requests",
            WorkflowId::DiscoveryResponse => "Discovery Response",
            WorkflowId::SettlementLetter => "Settlement Letter",
            WorkflowId::Affidavit => "Affidavit",
            WorkflowId::EstatePlanning => "Estate Planning",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkflowId::DemandLetter => "Create professional demand letters",
            WorkflowId::Petition => "Generate legal petitions",
            WorkflowId::Motion => "Prepare court motions",
            WorkflowId::Response => "Create legal responses",
            WorkflowId::DiscoveryRequests => "Generate discovery requests",
            WorkflowId::DiscoveryResponse => "Prepare discovery responses",
            WorkflowId::SettlementLetter => "Draft settlement negotiations",
            WorkflowId::Affidavit => "Create sworn affidavits",
            WorkflowId::EstatePlanning => "Estate planning documents",
        }
    }

    /// Workflow-specific fields accepted by this workflow.
    pub fn declared_fields(&self) -> &'static [WorkflowField] {
        match self {
            WorkflowId::DemandLetter => &[WorkflowField::StowersDemand],
            WorkflowId::Motion => &[WorkflowField::MotionType],
            _ => &[],
        }
    }

    pub fn declares(&self, field: WorkflowField) -> bool {
        self.declared_fields().contains(&field)
    }

    /// Environment variable holding an explicit destination, e.g. `N8N_WEBHOOK_DEMAND_LETTER`.
    pub fn env_key(&self) -> String {
        format!(
            "N8N_WEBHOOK_{}",
            self.as_str().replace('-', "_").to_uppercase()
        )
    }

    /// Storage folder for this workflow's attachments.
    pub fn storage_segment(&self) -> &'static str {
        self.as_str()
    }
}

impl Display for WorkflowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid workflow id: {}", s))
    }
}

/// Display title for an arbitrary id; unknown ids get the generic title.
pub fn workflow_title(id: &str) -> &'static str {
    id.parse::<WorkflowId>()
        .map(|w| w.title())
        .unwrap_or(FALLBACK_WORKFLOW_TITLE)
}

/// Catalog entry with its resolved destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefinition {
    pub id: WorkflowId,
    pub title: &'static str,
    pub description: &'static str,
    pub destination_url: Option<String>,
}

impl WorkflowDefinition {
    pub fn is_configured(&self) -> bool {
        self.destination_url.is_some()
    }
}

/// The full, ordered set of workflows
#[derive(Debug, Clone)]
pub struct WorkflowCatalog {
    definitions: Vec<WorkflowDefinition>,
}

impl WorkflowCatalog {
    pub fn from_config(webhooks: &WebhookConfig) -> Self {
        let definitions = WorkflowId::ALL
            .iter()
            .map(|id| WorkflowDefinition {
                id: *id,
                title: id.title(),
                description: id.description(),
                destination_url: webhooks.destination_for(*id),
            })
            .collect();

        Self { definitions }
    }

    pub fn get(&self, id: WorkflowId) -> &WorkflowDefinition {
        // Built from WorkflowId::ALL, so every id has an entry at its own index.
        &self.definitions[id as usize]
    }

    /// Look up by the wire identifier.
    pub fn find(&self, id: &str) -> Option<&WorkflowDefinition> {
        id.parse::<WorkflowId>().ok().map(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
