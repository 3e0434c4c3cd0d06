//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::{collections::Suggestions, status::OperationStatus};
use crate::{
    error::MapperError,
    models::{Step, SuggestionSource},
};

/// Wrapper for the result of an operation that created something.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use waypoint_core::{display::CreateResult, models::Step};
///
/// let step = Step::root("42", "Browse catalog", Timestamp::now());
/// let output = CreateResult::new(step).to_string();
/// assert!(output.starts_with("Added step `42`"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added step `{}`", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of one suggestion request.
///
/// A failed request is not an error for the operation that triggered it:
/// the journey change stands, the suggestion list is emptied and `failure`
/// carries the cause for the notification.
#[derive(Debug, Default)]
pub struct GenerationResult {
    pub suggestions: Suggestions,
    pub source: Option<SuggestionSource>,
    pub failure: Option<MapperError>,
    /// False when a newer request superseded this one
    pub applied: bool,
}

impl GenerationResult {
    pub fn is_fallback(&self) -> bool {
        self.source == Some(SuggestionSource::Fallback)
    }
}

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Suggestions")?;
        writeln!(f)?;

        if let Some(failure) = &self.failure {
            write!(f, "{}", OperationStatus::failure(failure.to_string()))?;
            if matches!(failure.root_cause(), MapperError::RelayUnavailable { .. }) {
                writeln!(f)?;
                writeln!(f, "The relay is not running. Start it with `wp relay`.")?;
            }
            return Ok(());
        }

        if !self.applied {
            return writeln!(f, "Superseded by a newer request.");
        }

        write!(f, "{}", self.suggestions)?;
        if self.is_fallback() {
            writeln!(f)?;
            writeln!(
                f,
                "*Set credentials with `wp credentials set` for generated suggestions.*"
            )?;
        }
        Ok(())
    }
}
