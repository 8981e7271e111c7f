//! Shared types for the climate reporting services.

pub mod date;
pub mod error;

pub use date::{DateParseError, ObservationDate, DATE_FORMAT};
pub use error::{ClimateError, ClimateResult};
