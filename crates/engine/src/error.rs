//! Error types for the aggregation engine.

use thiserror::Error;

/// Errors produced by the engine and its collaborators.
///
/// Absence of a single unit's data (one month, one class) is represented
/// as `None` in the relevant API, never as an error. These variants
/// cover request-level failures only.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("external service error: {0}")]
    ExternalService(String),

    #[error("no imagery available: {0}")]
    DataUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("core error: {0}")]
    Core(#[from] agrolens_core::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
