//! Route table for the climate API.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// The static `precipitation`, `stations` and `tobs` routes take
/// precedence over the `:start` capture at the same path position.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Route listing
        .route("/", get(handlers::index::index_handler))
        // Observation reports
        .route(
            "/api/v1.0/precipitation",
            get(handlers::precipitation::precipitation_handler),
        )
        .route(
            "/api/v1.0/stations",
            get(handlers::stations::stations_handler),
        )
        .route("/api/v1.0/tobs", get(handlers::tobs::tobs_handler))
        // Temperature summaries over a date range
        .route(
            "/api/v1.0/:start",
            get(handlers::temperature::range_start_handler),
        )
        .route(
            "/api/v1.0/:start/:end",
            get(handlers::temperature::range_start_end_handler),
        )
        // Health and readiness
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
