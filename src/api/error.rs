//! API error mapping: every failure becomes an `{error, status}` JSON body.

use super::validate::ValidationError;
use crate::model::ModelError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Strict-boundary rejection; surfaced before the core runs.
    Validation(ValidationError),
    /// Unparseable CSV upload.
    BadCsv(String),
    /// Inference failed at request time.
    Model(ModelError),
    /// Persistence failed.
    Database(rusqlite::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::BadCsv(msg) => (StatusCode::BAD_REQUEST, format!("Invalid CSV: {}", msg)),
            ApiError::Model(e) => {
                tracing::error!(error = %e, "inference error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Inference failed".to_string())
            }
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        ApiError::Model(e)
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(e: rusqlite::Error) -> Self {
        ApiError::Database(e)
    }
}
