//! Data models for journeys, steps, suggestions and credentials.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use waypoint_core::models::{Step, validate_sequence};
//!
//! let root = Step::root("1", "Context: Online bookstore", Timestamp::now());
//! let next = Step::child_of(&root, "2", "Browse catalog", Timestamp::now());
//! assert_eq!(next.level, 1);
//! assert!(validate_sequence(&[root, next]).is_ok());
//! ```

pub mod credentials;
pub mod export;
pub mod project;
pub mod step;
pub mod suggestion;

#[cfg(test)]
mod tests;

pub use credentials::{Credentials, Provider};
pub use export::{ExportMetadata, JourneyExport};
pub use project::{template_projects, JourneyTemplate, SavedProject, TEMPLATES};
pub use step::{validate_sequence, Step, MAX_LEVEL};
pub use suggestion::{
    truncate_words, Suggestion, SuggestionSource, MAX_SUGGESTIONS, MAX_SUGGESTION_WORDS,
};
