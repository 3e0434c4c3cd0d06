//! Step model definition and sequence validation.

use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{MapperError, Result};

/// Deepest level a step can sit at; deeper appends are clamped here.
pub const MAX_LEVEL: u8 = 3;

/// One node in a journey tree.
///
/// Steps are immutable once created. A journey grows by appending new steps
/// or by replacing the whole sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: String,

    /// Display text of the step
    pub text: String,

    /// Depth in the journey tree (0..=3)
    pub level: u8,

    /// Identifier of an earlier step in the same journey
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Timestamp when the step was created, as epoch milliseconds on the wire
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub timestamp: Timestamp,
}

/// Drops sub-millisecond precision so a step survives its wire format
/// unchanged.
pub(crate) fn whole_millis(timestamp: Timestamp) -> Timestamp {
    Timestamp::from_millisecond(timestamp.as_millisecond()).unwrap_or(timestamp)
}

impl Step {
    /// Creates a root step (level 0, no parent).
    pub fn root(id: impl Into<String>, text: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level: 0,
            parent: None,
            timestamp: whole_millis(timestamp),
        }
    }

    /// Creates a step that follows `parent`, one level deeper (clamped).
    pub fn child_of(
        parent: &Step,
        id: impl Into<String>,
        text: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level: parent.level.saturating_add(1).min(MAX_LEVEL),
            parent: Some(parent.id.clone()),
            timestamp: whole_millis(timestamp),
        }
    }
}

/// Checks that a step sequence is a well-formed journey.
///
/// Ids must be unique and non-empty, levels at most [`MAX_LEVEL`], and every
/// parent must name a step that appears earlier in the sequence.
pub fn validate_sequence(steps: &[Step]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        if step.id.is_empty() {
            return Err(MapperError::invalid_input("id")
                .with_reason(format!("step at position {index} has an empty id")));
        }
        if step.level > MAX_LEVEL {
            return Err(MapperError::invalid_input("level").with_reason(format!(
                "step '{}' has level {} (max {MAX_LEVEL})",
                step.id, step.level
            )));
        }
        if let Some(parent) = step.parent.as_deref().filter(|p| !p.is_empty()) {
            if !seen.contains(parent) {
                return Err(MapperError::invalid_input("parent").with_reason(format!(
                    "step '{}' refers to '{parent}', which is not an earlier step",
                    step.id
                )));
            }
        }
        if !seen.insert(step.id.as_str()) {
            return Err(MapperError::invalid_input("id")
                .with_reason(format!("duplicate step id '{}'", step.id)));
        }
    }
    Ok(())
}
