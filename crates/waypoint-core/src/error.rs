//! Error types for the journey mapper library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all mapper operations.
///
/// Nothing here is fatal to the process. Callers surface these as a
/// dismissable notification and keep (or empty) their in-memory state.
#[derive(Error, Debug)]
pub enum MapperError {
    /// Missing or unusable API credentials
    #[error("Credential error: {message}")]
    Credential { message: String },
    /// The local relay answered with a non-success status
    #[error("Relay responded with status {status}: {body}")]
    Relay { status: u16, body: String },
    /// The local relay could not be reached at all
    #[error("Relay unavailable at {url}: {message}")]
    RelayUnavailable { url: String, message: String },
    /// The relay body was not the shape we expected
    #[error("Parse error: {message}")]
    Parse { message: String },
    /// A persisted entry could not be decoded
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },
    /// Suggestion generation failed; wraps the underlying cause
    #[error("Suggestion generation failed: {source}")]
    Generation {
        #[source]
        source: Box<MapperError>,
    },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> MapperError {
        MapperError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MapperError {
        MapperError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MapperError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a credential error.
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Wraps an error as a generation failure.
    pub fn generation(source: MapperError) -> Self {
        Self::Generation {
            source: Box::new(source),
        }
    }

    /// Maps a `spawn_blocking` join failure.
    pub(crate) fn join(e: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {e}"),
        }
    }

    /// Returns the innermost cause, looking through `Generation` wrappers.
    pub fn root_cause(&self) -> &MapperError {
        match self {
            Self::Generation { source } => source.root_cause(),
            other => other,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MapperError::database(message).with_source(e))
    }
}

/// Result type alias for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;
