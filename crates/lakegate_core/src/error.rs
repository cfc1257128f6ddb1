//! Error types for pipeline operations.
//!
//! Faults are resolved to typed results before they surface: a
//! transformation fault is recorded on its job outcome, a validation fault
//! becomes an ERROR entry in the result log. Nothing escapes to the
//! orchestrator as an unhandled fault; the worst observable outcome is a
//! non-zero verdict plus a log explaining why.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Query or connection failure in the relational store
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Configuration file could not be read
    #[error("config error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A required table is missing from the store
    #[error("table '{0}' does not exist")]
    MissingTable(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
