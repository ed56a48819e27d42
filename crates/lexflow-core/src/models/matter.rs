//! Clio matter records

use serde::{Deserialize, Serialize};

/// Read-only mirror of a Clio matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matter {
    pub id: i64,
    #[serde(default)]
    pub display_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Matter {
    /// Text shown in the picklist and submitted as the matter value.
    pub fn label(&self) -> String {
        match (self.display_number.as_deref(), self.description.as_deref()) {
            (Some(number), Some(desc)) if !desc.is_empty() => format!("{} - {}", number, desc),
            (Some(number), _) => number.to_string(),
            (None, Some(desc)) => desc.to_string(),
            (None, None) => format!("Matter {}", self.id),
        }
    }
}

/// Envelope returned by the matters endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MattersPage {
    #[serde(default)]
    pub data: Vec<Matter>,
}

/// Result of populating the matter picklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatterPicklist {
    Loaded(Vec<Matter>),
    /// The lookup failed; the form still works with the free-text alternative.
    Unavailable { reason: String },
}

impl MatterPicklist {
    /// Matters to offer. Empty both when Clio has none and when the lookup failed.
    pub fn matters(&self) -> &[Matter] {
        match self {
            MatterPicklist::Loaded(matters) => matters,
            MatterPicklist::Unavailable { .. } => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MatterPicklist::Loaded(_))
    }
}
