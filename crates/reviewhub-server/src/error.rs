//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reviewhub_core::StartupError;

use crate::dto::ErrorResponse;

const DETAILS_HINT: &str = "Check server logs for more info";

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// The review table could not be loaded at startup.
    StartupFailed(StartupError),
}

impl From<StartupError> for AppError {
    fn from(e: StartupError) -> Self {
        AppError::StartupFailed(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::StartupFailed(err) = self;
        let body = ErrorResponse {
            error: err.message,
            details: DETAILS_HINT.into(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
