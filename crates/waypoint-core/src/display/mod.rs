//! Display formatting for journeys, suggestions and operation outcomes.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context-specific formatting for collections and
//! operation results. Everything renders as markdown, which the CLI prints
//! through its terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Step, Project) │───▶│ (Journey, ...)  │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Journey, Suggestions and Projects wrappers
//! - [`results`]: Outcomes of mutating operations (CreateResult, GenerationResult)
//! - [`status`]: One-line confirmations (OperationStatus)
//! - [`datetime`]: Local timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use waypoint_core::{display::Journey, models::Step};
//!
//! let root = Step::root("1", "Context: Bookstore", Timestamp::now());
//! let next = Step::child_of(&root, "2", "Browse catalog", Timestamp::now());
//! let steps = vec![root, next];
//!
//! let output = Journey::new("Bookstore", &steps).to_string();
//! assert!(output.contains("# Journey: Bookstore"));
//! assert!(output.contains("  - Browse catalog `2`"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Journey, Projects, Suggestions};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, GenerationResult};
pub use status::OperationStatus;
