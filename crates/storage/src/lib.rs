//! Storage access for the climate reporting services.
//!
//! Provides the SQLite-backed query facade:
//! - `ClimateStore` owns the process-wide connection pool
//! - schema verification for the fixed station/measurement tables

pub mod schema;
pub mod store;

pub use schema::verify_schema;
pub use store::{
    ClimateStore, PrecipitationRow, StationActivity, TemperatureReading, TemperatureSummary,
};
