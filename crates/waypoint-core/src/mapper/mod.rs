//! High-level mapper API.
//!
//! [`Mapper`] is the single owner of the live journey. It wires the
//! credential store, suggestion generator, journey state and diagram adapter
//! together and persists state after every mutation.
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────┐   ┌──────────────┐
//! │  CLI / UI    │──▶│       Mapper        │──▶│    Store     │
//! └──────────────┘   │ journey · diagram   │   └──────────────┘
//!                    │ credentials         │   ┌──────────────┐
//!                    │ generator ──────────┼──▶│    Relay     │
//!                    └─────────────────────┘   └──────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Mapper`] instances
//! - [`journey_ops`]: Start, extend, navigate and complete the journey
//! - [`project_ops`]: Saved projects, persistence, export and sharing
//! - [`credential_ops`]: Credential management
//!
//! # Usage
//!
//! ```rust,no_run
//! use waypoint_core::{params::StartJourney, MapperBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mapper = MapperBuilder::new()
//!     .with_database_path(Some("journeys.db"))
//!     .build()
//!     .await?;
//!
//! let result = mapper
//!     .start_journey(&StartJourney {
//!         context: "Online bookstore".to_string(),
//!     })
//!     .await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub mod builder;
pub mod credential_ops;
pub mod journey_ops;
pub mod project_ops;


pub use builder::MapperBuilder;

use crate::{
    credential_store::CredentialStore,
    diagram::DiagramAdapter,
    generator::SuggestionGenerator,
    journey::JourneyState,
    models::SavedProject,
    storage::Store,
};

/// Main interface for building journeys.
///
/// Operations take `&mut self`, so mutations are serialized by the borrow
/// checker; the relay round-trip is the only await point that leaves the
/// process.
///
/// Because of that borrow, a mapper never has two suggestion requests in
/// flight and every [`GenerationResult`](crate::display::GenerationResult) it
/// returns has `applied` set. The generation ticket guard only takes effect
/// for callers that drive [`JourneyState::begin_generation`] and
/// [`JourneyState::finish_generation`] themselves.
#[derive(Debug)]
pub struct Mapper {
    pub(crate) store: Store,
    pub(crate) credentials: CredentialStore,
    pub(crate) generator: SuggestionGenerator,
    pub(crate) journey: JourneyState,
    pub(crate) diagram: DiagramAdapter,
    pub(crate) projects: Vec<SavedProject>,
}

impl Mapper {
    /// Read access to the live journey.
    pub fn journey(&self) -> &JourneyState {
        &self.journey
    }

    pub fn diagram_adapter(&self) -> &DiagramAdapter {
        &self.diagram
    }

    /// Mutable access to the diagram adapter, for viewport and palette
    /// control.
    pub fn diagram_adapter_mut(&mut self) -> &mut DiagramAdapter {
        &mut self.diagram
    }

    pub fn database_path(&self) -> &Path {
        self.store.path()
    }

    pub fn relay_url(&self) -> &str {
        self.generator.client().base_url()
    }
}
