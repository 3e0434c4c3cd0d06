//! Journey operations for the Mapper.

use jiff::Timestamp;
use log::{debug, info};

use super::Mapper;
use crate::{
    diagram::RenderedDiagram,
    display::{GenerationResult, Suggestions},
    error::{MapperError, Result},
    models::Step,
    params::{AddStep, StartJourney, Suggest},
    prompts::PromptKind,
};

/// What happened when the user picked a suggestion.
#[derive(Debug)]
pub enum PickOutcome {
    /// The suggestion became a step
    Added {
        step: Step,
        generation: GenerationResult,
    },
    /// A fallback suggestion was picked; it points at credential setup
    /// rather than a journey step
    CredentialsNeeded,
}

impl Mapper {
    /// Starts a new journey for `params.context` and generates the first
    /// suggestions.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` for a blank context, or a storage
    /// error if the journey cannot be persisted. Generation failures are
    /// reported in the returned [`GenerationResult`].
    pub async fn start_journey(&mut self, params: &StartJourney) -> Result<GenerationResult> {
        self.journey
            .start_journey(&params.context, Timestamp::now())?;
        self.persist().await?;
        info!("Started journey: {}", self.journey.context());
        Ok(self.regenerate_tail().await)
    }

    /// Appends a step after the current tail and regenerates suggestions for
    /// the new tail.
    pub async fn append_step(&mut self, params: &AddStep) -> Result<(Step, GenerationResult)> {
        let step = self
            .journey
            .append_step(&params.text, Timestamp::now())?
            .clone();
        self.persist().await?;
        debug!("Appended step {} at level {}", step.id, step.level);
        Ok((step, self.regenerate_tail().await))
    }

    /// Picks the suggestion at 1-based position `number` in the current list.
    pub async fn pick_suggestion(&mut self, number: usize) -> Result<PickOutcome> {
        let suggestion = number
            .checked_sub(1)
            .and_then(|index| self.journey.suggestions().get(index))
            .cloned()
            .ok_or_else(|| {
                MapperError::invalid_input("suggestion").with_reason(format!(
                    "no suggestion {number} (have {})",
                    self.journey.suggestions().len()
                ))
            })?;

        if !suggestion.is_generated() {
            return Ok(PickOutcome::CredentialsNeeded);
        }

        let (step, generation) = self
            .append_step(&AddStep {
                text: suggestion.text,
            })
            .await?;
        Ok(PickOutcome::Added { step, generation })
    }

    /// Regenerates suggestions for the prefix ending at `step_id`. The
    /// stored journey is not truncated.
    pub async fn select_node(&mut self, step_id: &str) -> Result<GenerationResult> {
        let prefix = self
            .journey
            .select_node(step_id)
            .map(<[Step]>::to_vec)
            .ok_or_else(|| {
                MapperError::invalid_input("step_id").with_reason(format!("no step '{step_id}'"))
            })?;
        Ok(self.regenerate(prefix).await)
    }

    /// Maps a diagram node back to its step and selects it.
    pub async fn click_node(&mut self, node_id: &str) -> Result<GenerationResult> {
        self.render_diagram();
        let step_id = self
            .diagram
            .node_step(node_id)
            .map(str::to_string)
            .ok_or_else(|| {
                MapperError::invalid_input("node_id").with_reason(format!("no node '{node_id}'"))
            })?;
        self.select_node(&step_id).await
    }

    /// Regenerates suggestions for the whole journey or, with a step id,
    /// for the prefix ending there.
    pub async fn suggest(&mut self, params: &Suggest) -> Result<GenerationResult> {
        match &params.step_id {
            Some(step_id) => self.select_node(step_id).await,
            None if self.journey.is_empty() => Err(MapperError::invalid_input("journey")
                .with_reason("start a journey first")),
            None => Ok(self.regenerate_tail().await),
        }
    }

    /// Steps back one history entry. `None` when there is nothing to undo.
    pub async fn undo(&mut self) -> Result<Option<GenerationResult>> {
        if !self.journey.undo() {
            return Ok(None);
        }
        self.persist().await?;
        Ok(Some(self.regenerate_tail().await))
    }

    /// Steps forward one history entry. `None` when there is nothing to redo.
    pub async fn redo(&mut self) -> Result<Option<GenerationResult>> {
        if !self.journey.redo() {
            return Ok(None);
        }
        self.persist().await?;
        Ok(Some(self.regenerate_tail().await))
    }

    /// Asks the model for a whole end-to-end journey and replaces the live
    /// sequence with it. The previous sequence stays reachable through undo.
    ///
    /// # Errors
    ///
    /// - `MapperError::InvalidInput` if no journey has been started
    /// - `MapperError::Credential` if no credentials are configured
    /// - `MapperError::Generation` if the request fails; the journey is
    ///   unchanged and the suggestion list is emptied
    pub async fn complete_journey(&mut self) -> Result<GenerationResult> {
        if self.journey.is_empty() {
            return Err(MapperError::invalid_input("journey").with_reason("start a journey first"));
        }
        if !self.credentials.has_valid() {
            return Err(MapperError::credential(
                "AI credentials are required to complete a journey",
            ));
        }

        let context = self.journey.context().to_string();
        let steps = self.journey.steps().to_vec();
        let outcome = self
            .generator
            .generate(
                &mut self.credentials,
                PromptKind::CompleteJourney,
                &context,
                &steps,
            )
            .await;
        let suggestions = match outcome {
            Ok((suggestions, _)) => suggestions,
            Err(e) => {
                self.journey.clear_suggestions();
                return Err(e);
            }
        };

        self.journey.complete_with(&suggestions, Timestamp::now())?;
        self.persist().await?;
        info!(
            "Completed journey with {} steps",
            self.journey.steps().len()
        );
        Ok(self.regenerate_tail().await)
    }

    /// Empties the journey and its history.
    pub async fn clear(&mut self) -> Result<()> {
        self.journey.clear();
        self.persist().await
    }

    /// Renders the diagram if the journey changed since the last render.
    pub fn render_diagram(&mut self) -> Option<RenderedDiagram> {
        self.diagram
            .render(self.journey.steps(), self.journey.context())
    }

    /// Current Mermaid source, rendering first if needed.
    pub fn diagram_source(&mut self) -> Option<String> {
        self.render_diagram();
        self.diagram.source().map(str::to_string)
    }

    pub(crate) async fn regenerate_tail(&mut self) -> GenerationResult {
        let steps = self.journey.steps().to_vec();
        self.regenerate(steps).await
    }

    /// Runs one suggestion request for `steps` under a fresh ticket.
    ///
    /// `&mut self` is held across the relay await, so the ticket issued here
    /// is still the newest one when the response arrives.
    pub(crate) async fn regenerate(&mut self, steps: Vec<Step>) -> GenerationResult {
        let ticket = self.journey.begin_generation();
        let context = self.journey.context().to_string();
        let outcome = self
            .generator
            .generate(&mut self.credentials, PromptKind::NextStep, &context, &steps)
            .await;

        match outcome {
            Ok((suggestions, source)) => {
                let applied =
                    self.journey
                        .finish_generation(ticket, suggestions.clone(), Some(source));
                GenerationResult {
                    suggestions: Suggestions(suggestions),
                    source: Some(source),
                    failure: None,
                    applied,
                }
            }
            Err(e) => {
                let applied = self.journey.finish_generation(ticket, Vec::new(), None);
                GenerationResult {
                    failure: Some(e),
                    applied,
                    ..GenerationResult::default()
                }
            }
        }
    }
}
