//! Builder for creating and configuring Mapper instances.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use log::{debug, info, warn};

use super::Mapper;
use crate::{
    credential_store::CredentialStore,
    diagram::DiagramAdapter,
    error::{MapperError, Result},
    generator::SuggestionGenerator,
    journey::JourneyState,
    models::{template_projects, SavedProject, Step},
    relay::{RelayClient, DEFAULT_RELAY_URL},
    storage::{Store, CONTEXT_KEY, PROJECTS_KEY, STEPS_KEY},
};

/// Builder for creating and configuring Mapper instances.
#[derive(Debug, Clone)]
pub struct MapperBuilder {
    database_path: Option<PathBuf>,
    relay_url: Option<String>,
}

impl MapperBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            relay_url: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the relay base URL. Defaults to [`DEFAULT_RELAY_URL`].
    pub fn with_relay_url(mut self, url: Option<impl Into<String>>) -> Self {
        if let Some(url) = url {
            self.relay_url = Some(url.into());
        }
        self
    }

    /// Opens storage and loads persisted state.
    ///
    /// Corrupt persisted entries are discarded with a warning. The project
    /// list is seeded with the built-in templates the first time.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::XdgDirectory` if the default path cannot be
    /// resolved, `MapperError::FileSystem` if the database directory cannot
    /// be created, or `MapperError::Database` if initialization fails.
    pub async fn build(self) -> Result<Mapper> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let relay_url = self
            .relay_url
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());

        let store = Store::open(&db_path).await?;
        let credentials = CredentialStore::load(store.clone()).await?;

        let steps: Vec<Step> = store
            .load_json_or_discard(STEPS_KEY)
            .await?
            .unwrap_or_default();
        let context: String = store
            .load_json_or_discard(CONTEXT_KEY)
            .await?
            .unwrap_or_default();

        let mut journey = JourneyState::new();
        if let Err(e) = journey.restore(&context, steps) {
            warn!("Discarding persisted journey: {e}");
            store.remove(STEPS_KEY).await?;
        }

        let projects = match store
            .load_json_or_discard::<Vec<SavedProject>>(PROJECTS_KEY)
            .await?
        {
            Some(projects) => projects,
            None => {
                let seeded = template_projects(Timestamp::now());
                store.save_json(PROJECTS_KEY, &seeded).await?;
                debug!("Seeded {} template projects", seeded.len());
                seeded
            }
        };

        info!(
            "Mapper ready: {} steps, {} projects, relay {relay_url}",
            journey.steps().len(),
            projects.len()
        );

        Ok(Mapper {
            store,
            credentials,
            generator: SuggestionGenerator::new(RelayClient::new(relay_url)),
            journey,
            diagram: DiagramAdapter::new(),
            projects,
        })
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| MapperError::XdgDirectory(e.to_string()))
    }
}

impl Default for MapperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
