//! Webhook delivery outcome

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Result of a single POST to a workflow destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeliveryOutcome {
    /// Destination answered with a 2xx status
    Delivered {
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
    /// No destination, transport failure or non-2xx answer
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        DeliveryOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

impl Display for DeliveryOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DeliveryOutcome::Delivered { status_code } => {
                write!(f, "delivered (HTTP {})", status_code)
            }
            DeliveryOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
