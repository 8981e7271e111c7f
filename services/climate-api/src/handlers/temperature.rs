//! Temperature range summary handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Response},
    Json,
};
use climate_common::{ClimateError, ObservationDate};
use tracing::{debug, error};

use crate::handlers::error_response;
use crate::state::AppState;

/// GET /api/v1.0/:start
///
/// `[min, avg, max]` temperature over all observations on or after `start`.
pub async fn range_start_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    summarize(&state, &start, None).await
}

/// GET /api/v1.0/:start/:end
///
/// `[min, avg, max]` temperature between `start` and `end`, inclusive.
/// An inverted range yields the null triple rather than an error.
pub async fn range_start_end_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    summarize(&state, &start, Some(&end)).await
}

async fn summarize(state: &AppState, start: &str, end: Option<&str>) -> Response {
    let start_date = match parse_date(start) {
        Ok(date) => date,
        Err(response) => return response,
    };

    let end_date = match end {
        Some(raw) => match parse_date(raw) {
            Ok(date) => Some(date),
            Err(response) => return response,
        },
        None => None,
    };

    match state.store.temperature_summary(start_date, end_date).await {
        Ok(summary) => Json(summary.as_triple()).into_response(),
        Err(e) => {
            error!("Temperature summary failed: {}", e);
            error_response(&e)
        }
    }
}

fn parse_date(raw: &str) -> Result<ObservationDate, Response> {
    ObservationDate::parse(raw).map_err(|e| {
        let err = ClimateError::from(e);
        debug!("Rejected date parameter: {}", err);
        error_response(&err)
    })
}
