//! Exported journey document.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Step;

/// Downloadable JSON form of a journey.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JourneyExport {
    pub context: String,
    pub steps: Vec<Step>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// First step's timestamp, or the export time for an empty journey
    pub created: Timestamp,
    pub exported: Timestamp,
    pub step_count: usize,
}

impl JourneyExport {
    pub fn new(context: &str, steps: &[Step], exported: Timestamp) -> Self {
        Self {
            context: context.to_string(),
            steps: steps.to_vec(),
            metadata: ExportMetadata {
                created: steps.first().map_or(exported, |step| step.timestamp),
                exported,
                step_count: steps.len(),
            },
        }
    }
}
