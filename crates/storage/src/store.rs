//! SQLite-backed query facade over the observation dataset.

use climate_common::{ClimateError, ClimateResult, ObservationDate};
use serde::Serialize;
use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};

use crate::schema;

/// Shared read-only handle to the observation dataset.
///
/// One store is created at startup and shared across request tasks; each
/// query checks a connection out of the pool for its own duration, so a
/// failing request releases its connection on every exit path.
#[derive(Debug)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the dataset and verify the expected tables are present.
    pub async fn connect(database_url: &str) -> ClimateResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| ClimateError::DatabaseError(format!("Connection failed: {}", e)))?;

        schema::verify_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool. The caller is responsible for schema checks.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Cheap connectivity probe for readiness checks.
    pub async fn ping(&self) -> ClimateResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ClimateError::DatabaseError(format!("Ping failed: {}", e)))?;
        Ok(())
    }

    /// Every (date, prcp) pair in storage order.
    pub async fn precipitation(&self) -> ClimateResult<Vec<PrecipitationRow>> {
        sqlx::query_as::<_, PrecipitationRow>("SELECT date, prcp FROM measurement")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ClimateError::DatabaseError(format!("Query failed: {}", e)))
    }

    /// Every station identifier, storage order.
    pub async fn station_ids(&self) -> ClimateResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT station FROM station")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ClimateError::DatabaseError(format!("Query failed: {}", e)))
    }

    /// The station with the most temperature observations, with its count.
    ///
    /// Ties resolve to whichever station the descending count sort yields
    /// first; the order among tied stations is unspecified.
    pub async fn most_active_station(&self) -> ClimateResult<Option<StationActivity>> {
        sqlx::query_as::<_, StationActivity>(
            "SELECT station, COUNT(tobs) AS observations FROM measurement \
             GROUP BY station ORDER BY observations DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ClimateError::DatabaseError(format!("Query failed: {}", e)))
    }

    /// The most recent observation date across all measurements.
    pub async fn latest_observation_date(&self) -> ClimateResult<Option<ObservationDate>> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT date FROM measurement ORDER BY date DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ClimateError::DatabaseError(format!("Query failed: {}", e)))?;

        match raw {
            Some(raw) => ObservationDate::parse(&raw).map(Some).map_err(|e| {
                ClimateError::DatabaseError(format!("Stored date unreadable: {}", e))
            }),
            None => Ok(None),
        }
    }

    /// (date, tobs) readings for one station from `cutoff` onwards.
    pub async fn temperatures_since(
        &self,
        station: &str,
        cutoff: ObservationDate,
    ) -> ClimateResult<Vec<TemperatureReading>> {
        sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, tobs FROM measurement WHERE station = ?1 AND date >= ?2",
        )
        .bind(station)
        .bind(cutoff.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ClimateError::DatabaseError(format!("Query failed: {}", e)))
    }

    /// Min/avg/max temperature over a date range.
    ///
    /// `end` is inclusive when present; with no `end` the range is open
    /// above. An empty match set yields three nulls rather than an error,
    /// so a start after the last observation (or after `end`) is
    /// well-defined.
    pub async fn temperature_summary(
        &self,
        start: ObservationDate,
        end: Option<ObservationDate>,
    ) -> ClimateResult<TemperatureSummary> {
        let row = match end {
            Some(end) => {
                sqlx::query_as::<_, SummaryRow>(
                    "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
                     FROM measurement WHERE date >= ?1 AND date <= ?2",
                )
                .bind(start.to_string())
                .bind(end.to_string())
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, SummaryRow>(
                    "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
                     FROM measurement WHERE date >= ?1",
                )
                .bind(start.to_string())
                .fetch_one(&self.pool)
                .await
            }
        }
        .map_err(|e| ClimateError::DatabaseError(format!("Query failed: {}", e)))?;

        Ok(row.into())
    }
}

/// One (date, prcp) measurement row. `prcp` is nullable in the dataset.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// One (date, tobs) reading for the recent-observations query.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

/// Observation count for one station.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// Raw aggregate row; all columns are null when no measurement matched.
#[derive(Debug, FromRow)]
struct SummaryRow {
    tmin: Option<f64>,
    tavg: Option<f64>,
    tmax: Option<f64>,
}

/// Min/avg/max temperature triple; `avg` is rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureSummary {
    /// The `[min, avg, max]` wire shape.
    pub fn as_triple(&self) -> [Option<f64>; 3] {
        [self.min, self.avg, self.max]
    }
}

impl From<SummaryRow> for TemperatureSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            min: row.tmin,
            avg: row.tavg.map(|v| (v * 10.0).round() / 10.0),
            max: row.tmax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    async fn empty_store() -> ClimateStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE measurement (
                id INTEGER PRIMARY KEY,
                station TEXT,
                date TEXT,
                prcp REAL,
                tobs REAL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE station (
                id INTEGER PRIMARY KEY,
                station TEXT,
                name TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        ClimateStore::from_pool(pool)
    }

    async fn insert_station(store: &ClimateStore, id: &str, name: &str) {
        sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
            .bind(id)
            .bind(name)
            .execute(&store.pool)
            .await
            .unwrap();
    }

    async fn insert_measurement(
        store: &ClimateStore,
        station: &str,
        date: &str,
        prcp: Option<f64>,
        tobs: f64,
    ) {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&store.pool)
            .await
            .unwrap();
    }

    fn date_string(base: &str, offset_days: i64) -> String {
        let base = NaiveDate::parse_from_str(base, "%Y-%m-%d").unwrap();
        (base + Duration::days(offset_days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[tokio::test]
    async fn test_station_ids_complete_in_storage_order() {
        let store = empty_store().await;
        insert_station(&store, "USC00519397", "WAIKIKI").await;
        insert_station(&store, "USC00513117", "KANEOHE").await;
        insert_station(&store, "USC00514830", "KUALOA RANCH").await;

        let ids = store.station_ids().await.unwrap();
        assert_eq!(ids, vec!["USC00519397", "USC00513117", "USC00514830"]);
    }

    #[tokio::test]
    async fn test_precipitation_rows_preserve_nulls() {
        let store = empty_store().await;
        insert_measurement(&store, "A", "2017-01-01", Some(0.08), 65.0).await;
        insert_measurement(&store, "A", "2017-01-02", None, 63.0).await;

        let rows = store.precipitation().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prcp, Some(0.08));
        assert_eq!(rows[1].prcp, None);
    }

    #[tokio::test]
    async fn test_most_active_station_picks_highest_count() {
        let store = empty_store().await;
        // Station B has more observations than station A
        for i in 0..12 {
            insert_measurement(&store, "A", &date_string("2017-01-01", i), None, 60.0).await;
        }
        for i in 0..20 {
            insert_measurement(&store, "B", &date_string("2017-01-01", i), None, 70.0).await;
        }

        let active = store.most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, "B");
        assert_eq!(active.observations, 20);
    }

    #[tokio::test]
    async fn test_most_active_station_empty_dataset() {
        let store = empty_store().await;
        assert!(store.most_active_station().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_observation_date() {
        let store = empty_store().await;
        assert!(store.latest_observation_date().await.unwrap().is_none());

        insert_measurement(&store, "A", "2017-08-23", Some(0.0), 81.0).await;
        insert_measurement(&store, "A", "2016-01-09", Some(0.1), 68.0).await;

        let latest = store.latest_observation_date().await.unwrap().unwrap();
        assert_eq!(latest.to_string(), "2017-08-23");
    }

    #[tokio::test]
    async fn test_temperatures_since_filters_station_and_cutoff() {
        let store = empty_store().await;
        insert_measurement(&store, "A", "2017-05-01", None, 75.0).await;
        insert_measurement(&store, "B", "2016-08-21", None, 71.0).await;
        insert_measurement(&store, "B", "2016-08-22", None, 72.0).await;
        insert_measurement(&store, "B", "2017-08-23", None, 79.0).await;

        let cutoff = ObservationDate::parse("2016-08-22").unwrap();
        let readings = store.temperatures_since("B", cutoff).await.unwrap();

        let dates: Vec<&str> = readings.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2016-08-22", "2017-08-23"]);
        assert_eq!(readings[1].tobs, 79.0);
    }

    #[tokio::test]
    async fn test_summary_open_ended_range() {
        let store = empty_store().await;
        insert_measurement(&store, "A", "2017-01-01", None, 62.0).await;
        insert_measurement(&store, "A", "2017-01-02", None, 69.0).await;
        insert_measurement(&store, "A", "2017-01-03", None, 74.0).await;
        // Before the range, must not contribute
        insert_measurement(&store, "A", "2016-12-31", None, 10.0).await;

        let start = ObservationDate::parse("2017-01-01").unwrap();
        let summary = store.temperature_summary(start, None).await.unwrap();

        assert_eq!(summary.min, Some(62.0));
        assert_eq!(summary.max, Some(74.0));
        // (62 + 69 + 74) / 3 = 68.333..., rounded to one decimal
        assert_eq!(summary.avg, Some(68.3));

        let avg = summary.avg.unwrap();
        assert!(summary.min.unwrap() <= avg && avg <= summary.max.unwrap());
        assert_eq!((avg * 10.0).round() / 10.0, avg);
    }

    #[tokio::test]
    async fn test_summary_bounded_range_inclusive() {
        let store = empty_store().await;
        insert_measurement(&store, "A", "2017-01-01", None, 62.0).await;
        insert_measurement(&store, "A", "2017-01-05", None, 70.0).await;
        insert_measurement(&store, "A", "2017-01-09", None, 78.0).await;

        let start = ObservationDate::parse("2017-01-01").unwrap();
        let end = ObservationDate::parse("2017-01-05").unwrap();
        let summary = store.temperature_summary(start, Some(end)).await.unwrap();

        assert_eq!(summary.min, Some(62.0));
        assert_eq!(summary.avg, Some(66.0));
        assert_eq!(summary.max, Some(70.0));
    }

    #[tokio::test]
    async fn test_summary_empty_range_is_null_triple() {
        let store = empty_store().await;
        insert_measurement(&store, "A", "2017-01-01", None, 62.0).await;

        let start = ObservationDate::parse("2018-01-01").unwrap();
        let summary = store.temperature_summary(start, None).await.unwrap();
        assert_eq!(summary.as_triple(), [None, None, None]);
    }

    #[tokio::test]
    async fn test_summary_inverted_range_is_null_triple() {
        let store = empty_store().await;
        insert_measurement(&store, "A", "2017-01-05", None, 70.0).await;

        let start = ObservationDate::parse("2017-01-09").unwrap();
        let end = ObservationDate::parse("2017-01-01").unwrap();
        let summary = store.temperature_summary(start, Some(end)).await.unwrap();
        assert_eq!(summary.as_triple(), [None, None, None]);
    }

    #[tokio::test]
    async fn test_connect_verifies_schema_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observations.sqlite");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        // Provision a dataset file the way the loader would
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();
        sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, prcp REAL, tobs REAL)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("CREATE TABLE station (station TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let store = ClimateStore::connect(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_rejects_incomplete_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.sqlite");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();
        sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let err = ClimateStore::connect(&format!("sqlite://{}", path.display()))
            .await
            .unwrap_err();
        assert!(matches!(err, ClimateError::SchemaError(_)));
    }
}
