//! Live journey state: the step sequence, its context, undo/redo history and
//! the current suggestion list.
//!
//! [`JourneyState`] is purely in-memory and synchronous. Persistence and
//! suggestion generation are driven from [`crate::Mapper`], which owns one
//! of these.
//!
//! # Generation tickets
//!
//! A suggestion request is bracketed by [`JourneyState::begin_generation`]
//! and [`JourneyState::finish_generation`]. Every `begin` issues a strictly
//! increasing [`GenerationTicket`]; `finish` only applies results carrying
//! the most recently issued ticket. A slow response to an older request is
//! discarded even if it arrives last.

pub mod history;


use jiff::Timestamp;
use log::debug;

pub use history::History;

use crate::{
    error::{MapperError, Result},
    models::{
        step::whole_millis, validate_sequence, Step, Suggestion, SuggestionSource, MAX_LEVEL,
    },
};

/// Prefix of the root step created by [`JourneyState::start_journey`].
pub const CONTEXT_PREFIX: &str = "Context: ";

/// Identifies one suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// The journey being edited.
#[derive(Debug, Default)]
pub struct JourneyState {
    context: String,
    steps: Vec<Step>,
    history: History,
    suggestions: Vec<Suggestion>,
    suggestion_source: Option<SuggestionSource>,
    last_id: i64,
    latest_ticket: u64,
}

impl JourneyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Source of the current suggestion list, if any has been applied.
    pub fn suggestion_source(&self) -> Option<SuggestionSource> {
        self.suggestion_source
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Starts a new journey with a single root step for `context`.
    ///
    /// History is reset to that one-step sequence.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if `context` is blank.
    pub fn start_journey(&mut self, context: &str, now: Timestamp) -> Result<&Step> {
        let context = context.trim();
        if context.is_empty() {
            return Err(MapperError::invalid_input("context").with_reason("cannot be empty"));
        }

        let id = self.fresh_id(now);
        self.steps.clear();
        self.steps
            .push(Step::root(id, format!("{CONTEXT_PREFIX}{context}"), now));
        self.context = context.to_string();
        self.history.reset(&self.steps);
        self.clear_suggestions();

        debug!("Started journey for context '{context}'");
        Ok(&self.steps[0])
    }

    /// Appends a step after the current tail.
    ///
    /// The new step sits one level below the tail (clamped) with the tail as
    /// its parent, or becomes a fresh root when the journey is empty.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if `text` is blank.
    pub fn append_step(&mut self, text: &str, now: Timestamp) -> Result<&Step> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MapperError::invalid_input("text").with_reason("cannot be empty"));
        }

        let id = self.fresh_id(now);
        let step = match self.steps.last() {
            Some(tail) => Step::child_of(tail, id, text, now),
            None => Step::root(id, text, now),
        };
        self.steps.push(step);
        self.history.push(&self.steps);

        let index = self.steps.len() - 1;
        Ok(&self.steps[index])
    }

    /// The prefix of the journey up to and including `step_id`.
    ///
    /// The stored sequence is not touched.
    pub fn select_node(&self, step_id: &str) -> Option<&[Step]> {
        self.steps
            .iter()
            .position(|step| step.id == step_id)
            .map(|index| &self.steps[..=index])
    }

    /// Replaces the sequence wholesale and records it in history.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if `steps` violates the parent
    /// invariant. The journey is unchanged in that case.
    pub fn replace_all(&mut self, steps: Vec<Step>) -> Result<()> {
        validate_sequence(&steps)?;
        self.steps = steps;
        self.history.push(&self.steps);
        Ok(())
    }

    /// Loads a saved journey, resetting history to it.
    pub fn restore(&mut self, context: &str, steps: Vec<Step>) -> Result<()> {
        validate_sequence(&steps)?;
        self.context = context.to_string();
        self.steps = steps;
        if self.steps.is_empty() {
            self.history.clear();
        } else {
            self.history.reset(&self.steps);
        }
        self.clear_suggestions();
        Ok(())
    }

    /// Steps back one history entry. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.steps = entry.to_vec();
                true
            }
            None => false,
        }
    }

    /// Steps forward one history entry. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.steps = entry.to_vec();
                true
            }
            None => false,
        }
    }

    /// Empties the journey, its context, history and suggestions.
    pub fn clear(&mut self) {
        self.context.clear();
        self.steps.clear();
        self.history.clear();
        self.clear_suggestions();
    }

    /// Builds the step sequence for a completed journey from the model's
    /// suggestions: a single chain whose level grows every three steps.
    pub fn completion_steps(suggestions: &[Suggestion], now: Timestamp) -> Vec<Step> {
        let stamp = now.as_millisecond();
        let mut steps: Vec<Step> = Vec::with_capacity(suggestions.len());
        for (index, suggestion) in suggestions.iter().enumerate() {
            let level = u8::try_from(index / 3).unwrap_or(MAX_LEVEL).min(MAX_LEVEL);
            steps.push(Step {
                id: format!("complete_{stamp}_{index}"),
                text: suggestion.text.clone(),
                level,
                parent: steps.last().map(|prev| prev.id.clone()),
                timestamp: whole_millis(now),
            });
        }
        steps
    }

    /// Replaces the journey with a completed one built from `suggestions`.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if there are no suggestions; the
    /// journey is left unchanged.
    pub fn complete_with(&mut self, suggestions: &[Suggestion], now: Timestamp) -> Result<()> {
        if suggestions.is_empty() {
            return Err(MapperError::invalid_input("suggestions")
                .with_reason("the model returned no journey steps"));
        }
        self.replace_all(Self::completion_steps(suggestions, now))
    }

    /// Issues a ticket for a new suggestion request. Any earlier ticket
    /// becomes stale.
    pub fn begin_generation(&mut self) -> GenerationTicket {
        self.latest_ticket += 1;
        GenerationTicket(self.latest_ticket)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Applies the result of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the list untouched if a newer request has
    /// been issued since. `source` is `None` when the request failed, in
    /// which case `suggestions` is expected to be empty.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        suggestions: Vec<Suggestion>,
        source: Option<SuggestionSource>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale suggestions for ticket {} (latest {})",
                ticket.0, self.latest_ticket
            );
            return false;
        }
        self.suggestions = suggestions;
        self.suggestion_source = source;
        true
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_source = None;
    }

    /// Millisecond-based step id, unique within the current sequence.
    fn fresh_id(&mut self, now: Timestamp) -> String {
        let mut candidate = now.as_millisecond().max(self.last_id + 1);
        while self.steps.iter().any(|step| step.id == candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }
}
