//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::logic::PipelineError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    MissingField(&'static str),
    ValidationError(String),

    // Model errors
    ClassificationUnavailable(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MissingField(field) => {
                (StatusCode::BAD_REQUEST, format!("Missing '{}' key in request", field))
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ClassificationUnavailable(msg) => {
                tracing::error!("Classification unavailable: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Spam classification unavailable: {}", msg))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ClassificationUnavailable(e) => AppError::ClassificationUnavailable(e.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::ValidationError(format!("Invalid request body: {}", rejection.body_text()))
    }
}
