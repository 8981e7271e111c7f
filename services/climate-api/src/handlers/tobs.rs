//! Recent observations for the most active station.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use climate_common::{ClimateError, ClimateResult};
use tracing::{debug, error};

use crate::handlers::error_response;
use crate::state::AppState;

/// Window looked back from the latest observation, in days.
const LOOKBACK_DAYS: i64 = 366;

/// GET /api/v1.0/tobs
///
/// Temperatures recorded by the station with the most observations, from
/// roughly one year before the dataset's latest date onwards.
pub async fn tobs_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match recent_observations(&state).await {
        Ok(by_date) => Json(by_date).into_response(),
        Err(e @ ClimateError::NoObservations) => {
            debug!("Recent observations requested on empty dataset");
            error_response(&e)
        }
        Err(e) => {
            error!("Recent observation query failed: {}", e);
            error_response(&e)
        }
    }
}

async fn recent_observations(state: &AppState) -> ClimateResult<BTreeMap<String, f64>> {
    let Some(most_active) = state.store.most_active_station().await? else {
        return Err(ClimateError::NoObservations);
    };

    let Some(latest) = state.store.latest_observation_date().await? else {
        return Err(ClimateError::NoObservations);
    };

    let cutoff = latest.minus_days(LOOKBACK_DAYS);
    debug!(
        "Selecting observations for {} ({} readings) since {}",
        most_active.station, most_active.observations, cutoff
    );

    let readings = state
        .store
        .temperatures_since(&most_active.station, cutoff)
        .await?;

    let mut by_date = BTreeMap::new();
    for reading in readings {
        by_date.insert(reading.date, reading.tobs);
    }

    Ok(by_date)
}
