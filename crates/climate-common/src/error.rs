//! Error types for the climate reporting services.

use thiserror::Error;

use crate::date::DateParseError;

/// Result type alias using ClimateError.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Primary error type for climate query operations.
#[derive(Debug, Error)]
pub enum ClimateError {
    // === Request Errors ===
    #[error("Invalid date '{0}': expected yyyy-mm-dd")]
    InvalidDate(String),

    #[error("No observations recorded in the dataset")]
    NoObservations,

    // === Storage Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Schema mismatch: {0}")]
    SchemaError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ClimateError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ClimateError::InvalidDate(_) => 400,
            ClimateError::NoObservations => 404,
            ClimateError::DatabaseError(_)
            | ClimateError::SchemaError(_)
            | ClimateError::InternalError(_) => 500,
        }
    }

    /// Short title used in exception response bodies.
    pub fn title(&self) -> &'static str {
        match self {
            ClimateError::InvalidDate(_) => "Bad Request",
            ClimateError::NoObservations => "Not Found",
            ClimateError::DatabaseError(_)
            | ClimateError::SchemaError(_)
            | ClimateError::InternalError(_) => "Internal Server Error",
        }
    }
}

impl From<DateParseError> for ClimateError {
    fn from(err: DateParseError) -> Self {
        ClimateError::InvalidDate(err.0)
    }
}
