//! Error types for AgroLens

use thiserror::Error;

/// Main error type for AgroLens operations.
///
/// Variants follow the request-level failure taxonomy: invalid input and
/// unreachable backends abort a request; absence of data for a single
/// month or class never does (those degrade to missing values upstream).
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid region geometry: {0}")]
    InvalidRegion(String),

    #[error("external service error: {0}")]
    ExternalService(String),

    #[error("no data available: {0}")]
    DataUnavailable(String),

    #[error("computation error: {0}")]
    Computation(String),
}

/// Result type alias for AgroLens operations.
pub type Result<T> = std::result::Result<T, Error>;
