//! HTTP request handlers for the climate API.

pub mod health;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

use axum::{
    http::{header, StatusCode},
    response::Response,
};
use climate_common::ClimateError;
use serde::Serialize;

/// Exception body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ExceptionResponse {
    /// Short human-readable title.
    pub title: String,

    /// HTTP status code.
    pub status: u16,

    /// Detailed error message.
    pub detail: String,
}

impl ExceptionResponse {
    pub fn from_error(err: &ClimateError) -> Self {
        Self {
            title: err.title().to_string(),
            status: err.http_status_code(),
            detail: err.to_string(),
        }
    }
}

/// Render a ClimateError as a JSON exception response.
pub(crate) fn error_response(err: &ClimateError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let json = serde_json::to_string(&ExceptionResponse::from_error(err)).unwrap_or_default();

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(json.into())
        .unwrap()
}
