//! Core library for the Waypoint journey mapper.
//!
//! A journey is a tree of steps describing a product experience, grown one
//! step at a time from numbered suggestions. Suggestions come from a
//! language model reached through a local relay, or from static fallback
//! text when no credentials are configured. Journeys render as Mermaid
//! flowcharts.
//!
//! # Layout
//!
//! - [`models`]: Steps, suggestions, credentials, projects
//! - [`storage`] and [`db`]: SQLite-backed JSON key-value persistence
//! - [`credential_store`]: The owner of API key material
//! - [`relay`]: Relay client, response parsing and the relay server itself
//! - [`generator`] and [`prompts`]: Choosing between the relay and fallbacks
//! - [`journey`]: Live journey state with undo/redo
//! - [`diagram`]: Mermaid source, node mapping and viewport
//! - [`share`]: Export documents and share links
//! - [`display`]: Markdown formatting for everything above
//! - [`mapper`]: The [`Mapper`] facade tying it together
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{params::{AddStep, StartJourney}, MapperBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mapper = MapperBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let suggestions = mapper
//!     .start_journey(&StartJourney {
//!         context: "Online bookstore".to_string(),
//!     })
//!     .await?;
//! println!("{suggestions}");
//!
//! mapper
//!     .append_step(&AddStep {
//!         text: "Browse catalog".to_string(),
//!     })
//!     .await?;
//! println!("{}", mapper.diagram_source().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod credential_store;
pub mod db;
pub mod diagram;
pub mod display;
pub mod error;
pub mod generator;
pub mod journey;
pub mod mapper;
pub mod models;
pub mod params;
pub mod prompts;
pub mod relay;
pub mod share;
pub mod storage;

// Re-export commonly used types
pub use credential_store::CredentialStore;
pub use db::Database;
pub use diagram::{DiagramAdapter, RenderedDiagram};
pub use display::{
    CreateResult, GenerationResult, Journey, LocalDateTime, OperationStatus, Projects,
    Suggestions,
};
pub use error::{MapperError, Result};
pub use generator::SuggestionGenerator;
pub use journey::{GenerationTicket, JourneyState};
pub use mapper::{journey_ops::PickOutcome, Mapper, MapperBuilder};
pub use models::{Credentials, Provider, SavedProject, Step, Suggestion, SuggestionSource};
pub use params::{AddStep, OpenProject, SetCredentials, ShareJourney, StartJourney, Suggest};
pub use prompts::PromptKind;
pub use relay::{RelayClient, RelayConfig};
pub use storage::Store;
