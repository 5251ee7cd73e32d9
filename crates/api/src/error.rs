//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more raw inputs were rejected
    #[error("{} invalid input(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(vec![e])
    }
}

/// One rejected field
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: &'static str,
    pub message: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "validation_failed",
                    message: self.to_string(),
                    details: errors
                        .iter()
                        .map(|e| FieldError {
                            field: e.field().to_string(),
                            kind: e.kind(),
                            message: e.to_string(),
                        })
                        .collect(),
                },
            ),
            ApiError::Inference(e) => {
                error!("Inference error: {}", e);
                let error = match e {
                    InferenceError::SchemaMismatch { .. } => "schema_mismatch",
                    _ => "inference_failed",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error,
                        message: e.to_string(),
                        details: Vec::new(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
