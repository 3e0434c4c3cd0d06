//! Saved projects, persistence, export and sharing for the Mapper.

use jiff::Timestamp;
use log::{debug, info};

use super::Mapper;
use crate::{
    display::{GenerationResult, Projects},
    error::{MapperError, Result},
    journey::CONTEXT_PREFIX,
    models::{JourneyExport, SavedProject, Step},
    params::{OpenProject, ShareJourney, StartJourney},
    share,
    storage::{CONTEXT_KEY, PROJECTS_KEY, STEPS_KEY},
};

impl Mapper {
    /// Saved projects, most recent snapshot first, templates included.
    pub fn projects(&self) -> Projects {
        Projects(self.projects.clone())
    }

    /// Opens a saved project.
    ///
    /// A template starts a fresh journey from its context and, when
    /// credentials are configured, immediately completes it. Any other
    /// project restores its steps with a fresh history.
    pub async fn open_project(&mut self, params: &OpenProject) -> Result<GenerationResult> {
        let project = self
            .projects
            .iter()
            .find(|project| project.id == params.id)
            .cloned()
            .ok_or_else(|| {
                MapperError::invalid_input("id").with_reason(format!("no project '{}'", params.id))
            })?;

        if project.is_template {
            let started = self
                .start_journey(&StartJourney {
                    context: project.context,
                })
                .await?;
            if !self.credentials.has_valid() {
                return Ok(started);
            }
            return match self.complete_journey().await {
                Ok(generation) => Ok(generation),
                Err(e) => Ok(GenerationResult {
                    failure: Some(e),
                    applied: true,
                    ..GenerationResult::default()
                }),
            };
        }

        info!("Opening project {} ({})", project.id, project.name);
        self.restore(&project.context, project.steps).await
    }

    /// The journey as a pretty-printed export document.
    pub fn export_json(&self) -> Result<String> {
        share::export_json(
            self.journey.context(),
            self.journey.steps(),
            Timestamp::now(),
        )
    }

    /// A link carrying the live step sequence.
    pub fn share_url(&self, params: &ShareJourney) -> Result<String> {
        share::share_url(&params.origin, self.journey.steps())
    }

    /// Loads the steps carried by a share link.
    ///
    /// The context is recovered from a leading `Context:` root step, or the
    /// current context is kept.
    pub async fn import_shared(&mut self, url: &str) -> Result<GenerationResult> {
        let steps = share::import_shared(url)?;
        let context = steps
            .first()
            .and_then(|root| root.text.strip_prefix(CONTEXT_PREFIX))
            .map_or_else(|| self.journey.context().to_string(), str::to_string);
        self.restore(&context, steps).await
    }

    /// Loads an export document produced by [`Mapper::export_json`].
    pub async fn import_export(&mut self, json: &str) -> Result<GenerationResult> {
        let JourneyExport { context, steps, .. } = share::parse_export(json)?;
        self.restore(&context, steps).await
    }

    async fn restore(&mut self, context: &str, steps: Vec<Step>) -> Result<GenerationResult> {
        self.journey.restore(context, steps)?;
        self.persist().await?;
        if self.journey.is_empty() {
            return Ok(GenerationResult {
                applied: true,
                ..GenerationResult::default()
            });
        }
        Ok(self.regenerate_tail().await)
    }

    /// Writes the live steps and context, refreshing the current-project
    /// snapshot when there is something to snapshot.
    pub(crate) async fn persist(&mut self) -> Result<()> {
        let context = self.journey.context();
        let steps = self.journey.steps();

        let mut entries = vec![
            (STEPS_KEY, serde_json::to_string(steps)?),
            (CONTEXT_KEY, serde_json::to_string(context)?),
        ];

        if !context.trim().is_empty() && !steps.is_empty() {
            let snapshot = SavedProject::current(context, steps, Timestamp::now());
            self.projects.retain(|project| !project.is_current());
            self.projects.insert(0, snapshot);
            entries.push((PROJECTS_KEY, serde_json::to_string(&self.projects)?));
        }

        debug!("Persisting {} entries", entries.len());
        self.store.put_many(entries).await
    }
}
