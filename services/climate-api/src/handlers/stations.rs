//! Station listing handler.

use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::handlers::error_response;
use crate::state::AppState;

/// GET /api/v1.0/stations
pub async fn stations_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.store.station_ids().await {
        Ok(stations) => Json(stations).into_response(),
        Err(e) => {
            error!("Station query failed: {}", e);
            error_response(&e)
        }
    }
}
