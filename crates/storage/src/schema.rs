//! Startup verification of the fixed dataset schema.
//!
//! The dataset is provisioned externally and opened read-only, so instead
//! of reflecting table structure at runtime the expected columns are
//! declared here and checked once when the pool is opened. A missing table
//! or column aborts startup.

use climate_common::{ClimateError, ClimateResult};
use sqlx::{Row, SqlitePool};

/// Required columns per table.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station"]),
];

/// Check that both dataset tables expose the required columns.
pub async fn verify_schema(pool: &SqlitePool) -> ClimateResult<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
            .fetch_all(pool)
            .await
            .map_err(|e| {
                ClimateError::DatabaseError(format!("Schema inspection failed: {}", e))
            })?;

        // PRAGMA table_info returns no rows for an unknown table
        if rows.is_empty() {
            return Err(ClimateError::SchemaError(format!(
                "missing table '{}'",
                table
            )));
        }

        let present: Vec<String> = rows.iter().map(|row| row.get("name")).collect();

        for column in *columns {
            if !present.iter().any(|name| name == column) {
                return Err(ClimateError::SchemaError(format!(
                    "table '{}' is missing column '{}'",
                    table, column
                )));
            }
        }

        tracing::debug!("Verified table '{}' ({} columns)", table, present.len());
    }

    Ok(())
}
