use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::errors::SimulationError;
use crate::validation::FieldErrors;

pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected server error occurred.";

/// failure of a single request
#[derive(Debug)]
pub enum ApiError {
    /// body could not be read as a simulation form
    MalformedBody(String),
    /// one or more fields failed validation
    Validation(FieldErrors),
    /// the calculation itself refused the input
    Internal(SimulationError),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<SimulationError> for ApiError {
    fn from(error: SimulationError) -> Self {
        ApiError::Internal(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedBody(reason) => {
                tracing::debug!(%reason, "rejected malformed body");
                (StatusCode::BAD_REQUEST, Json(json!({ "body": reason }))).into_response()
            }
            ApiError::Validation(errors) => {
                tracing::debug!(%errors, "rejected invalid simulation request");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Internal(error) => {
                tracing::error!(%error, "simulation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
