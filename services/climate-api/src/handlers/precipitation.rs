//! Precipitation history handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::handlers::error_response;
use crate::state::AppState;

/// GET /api/v1.0/precipitation
///
/// One entry per date. Rows sharing a date collapse last-write-wins in
/// storage order, so the mapping is not station-disambiguated.
pub async fn precipitation_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let rows = match state.store.precipitation().await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Precipitation query failed: {}", e);
            return error_response(&e);
        }
    };

    let mut by_date: BTreeMap<String, Option<f64>> = BTreeMap::new();
    for row in rows {
        by_date.insert(row.date, row.prcp);
    }

    Json(by_date).into_response()
}
