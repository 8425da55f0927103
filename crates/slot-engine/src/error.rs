//! Error types for slot-engine operations.

use thiserror::Error;

/// Errors surfaced to callers of the engine.
///
/// Pure slot computation never fails; bad input is recovered with safe
/// defaults. Only configuration validation and data-source access produce
/// errors, so the calendar can tell "no availability" apart from "could not
/// determine availability".
#[derive(Error, Debug)]
pub enum EngineError {
    /// The schedule store or booking ledger could not be read.
    #[error("Data source '{source_name}' unavailable: {message}")]
    DataSource {
        source_name: String,
        message: String,
    },

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    /// A JSON fixture could not be parsed.
    #[error("Fixture parse error: {0}")]
    Fixture(#[from] serde_json::Error),
}

impl EngineError {
    pub fn data_source(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::DataSource {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from a backing store rather than bad input.
    pub fn is_data_source(&self) -> bool {
        matches!(self, EngineError::DataSource { .. })
    }
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
