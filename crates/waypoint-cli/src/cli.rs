//! Command handlers.
//!
//! Every handler calls one mapper operation and renders the markdown its
//! result displays as.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use log::debug;
use waypoint_core::{
    diagram::Palette,
    display::{CreateResult, GenerationResult, Journey, OperationStatus},
    params::{AddStep, OpenProject, SetCredentials, ShareJourney, StartJourney, Suggest},
    Mapper, PickOutcome,
};

use crate::{
    args::{CredentialCommands, ProjectCommands},
    renderer::TerminalRenderer,
};

/// Shown when a fallback suggestion is picked.
const CREDENTIALS_HINT: &str =
    "Generated suggestions need an API key. Run `wp credentials set --openai-key <KEY>` \
     or `wp credentials set --provider anthropic --anthropic-key <KEY>`.";

pub struct Cli {
    pub(crate) mapper: Mapper,
    pub(crate) renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(mapper: Mapper, renderer: TerminalRenderer) -> Self {
        Self { mapper, renderer }
    }

    pub async fn start(&mut self, params: StartJourney) -> Result<()> {
        let generation = self.mapper.start_journey(&params).await?;
        self.show_journey()?;
        self.renderer.render(&generation.to_string())
    }

    pub async fn add(&mut self, params: AddStep) -> Result<()> {
        let (step, generation) = self.mapper.append_step(&params).await?;
        self.renderer.render(&CreateResult::new(step).to_string())?;
        self.renderer.render(&generation.to_string())
    }

    /// Runs one suggestion request and prints the list.
    ///
    /// Only the newest list survives a CLI invocation, so picks in a later
    /// run refer to whatever the last command printed.
    pub async fn suggest(&mut self, params: Suggest) -> Result<()> {
        let generation = self.mapper.suggest(&params).await?;
        self.renderer.render(&generation.to_string())
    }

    /// Picks from a freshly generated list for the current tail.
    ///
    /// The regenerated list is printed first, since it can differ from the
    /// one an earlier command showed.
    pub async fn pick(&mut self, number: usize) -> Result<()> {
        let generation = self.mapper.suggest(&Suggest::default()).await?;
        self.renderer.render(&generation.to_string())?;
        self.pick_from_current(number).await
    }

    /// Picks from the list already held by the mapper.
    pub(crate) async fn pick_from_current(&mut self, number: usize) -> Result<()> {
        match self.mapper.pick_suggestion(number).await? {
            PickOutcome::Added { step, generation } => {
                self.renderer.render(&CreateResult::new(step).to_string())?;
                self.renderer.render(&generation.to_string())
            }
            PickOutcome::CredentialsNeeded => self
                .renderer
                .render(&OperationStatus::failure(CREDENTIALS_HINT).to_string()),
        }
    }

    pub async fn undo(&mut self) -> Result<()> {
        match self.mapper.undo().await? {
            Some(generation) => self.show_with(&generation),
            None => self
                .renderer
                .render(&OperationStatus::failure("Nothing to undo").to_string()),
        }
    }

    pub async fn redo(&mut self) -> Result<()> {
        match self.mapper.redo().await? {
            Some(generation) => self.show_with(&generation),
            None => self
                .renderer
                .render(&OperationStatus::failure("Nothing to redo").to_string()),
        }
    }

    pub async fn complete(&mut self) -> Result<()> {
        let generation = self.mapper.complete_journey().await?;
        self.show_with(&generation)
    }

    pub fn show_journey(&self) -> Result<()> {
        let journey = self.mapper.journey();
        self.renderer
            .render(&Journey::new(journey.context(), journey.steps()).to_string())
    }

    pub fn diagram(&mut self, palette: Option<&str>) -> Result<()> {
        if let Some(name) = palette {
            let Some(palette) = Palette::by_name(name) else {
                bail!("Unknown palette '{name}'. Use emerald, blue, violet or indigo.");
            };
            self.mapper.diagram_adapter_mut().set_palette(Some(palette));
        }

        match self.mapper.diagram_source() {
            Some(source) => {
                // Raw so the output can be piped into Mermaid tooling
                print!("{source}");
                Ok(())
            }
            None => self
                .renderer
                .render(&OperationStatus::failure("No journey to draw").to_string()),
        }
    }

    pub async fn clear(&mut self) -> Result<()> {
        self.mapper.clear().await?;
        self.renderer
            .render(&OperationStatus::success("Journey cleared").to_string())
    }

    pub async fn handle_project_command(&mut self, command: Option<ProjectCommands>) -> Result<()> {
        match command.unwrap_or(ProjectCommands::List) {
            ProjectCommands::List => self.renderer.render(&self.mapper.projects().to_string()),
            ProjectCommands::Open(args) => {
                let generation = self.mapper.open_project(&OpenProject::from(args)).await?;
                self.show_with(&generation)
            }
        }
    }

    pub async fn handle_credential_command(&mut self, command: CredentialCommands) -> Result<()> {
        match command {
            CredentialCommands::Set(args) => {
                self.mapper
                    .set_credentials(SetCredentials::from(args))
                    .await?;
                let status = OperationStatus::success("Credentials saved");
                self.renderer.render(&status.to_string())?;
                match self.mapper.credentials() {
                    Some(credentials) => self.renderer.render(&credentials.to_string()),
                    None => Ok(()),
                }
            }
            CredentialCommands::Show => match self.mapper.credentials() {
                Some(credentials) => self.renderer.render(&credentials.to_string()),
                None => self
                    .renderer
                    .render(&OperationStatus::failure("No credentials stored").to_string()),
            },
            CredentialCommands::Clear => {
                self.mapper.clear_credentials().await?;
                self.renderer
                    .render(&OperationStatus::success("Credentials removed").to_string())
            }
        }
    }

    pub fn export(&self, output: Option<PathBuf>) -> Result<()> {
        let json = self.mapper.export_json()?;
        match output {
            Some(path) => {
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let status = OperationStatus::success(format!("Exported to {}", path.display()));
                self.renderer.render(&status.to_string())
            }
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }

    pub fn share(&self, params: ShareJourney) -> Result<()> {
        let url = self.mapper.share_url(&params)?;
        println!("{url}");
        Ok(())
    }

    /// Imports a share link, or an export file when `source` is not a URL.
    pub async fn import(&mut self, source: &str) -> Result<()> {
        let generation = if source.contains("://") {
            self.mapper.import_shared(source).await?
        } else {
            let json = fs::read_to_string(source)
                .with_context(|| format!("Failed to read {source}"))?;
            self.mapper.import_export(&json).await?
        };
        debug!("Imported journey from {source}");
        self.show_with(&generation)
    }

    fn show_with(&self, generation: &GenerationResult) -> Result<()> {
        self.show_journey()?;
        self.renderer.render(&generation.to_string())
    }
}
