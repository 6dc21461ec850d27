//! Application error type mapping to HTTP status codes and the error envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use courier_types::error::{MessageError, ValidationError};

use crate::http::response::ApiError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the message pipeline.
    Message(MessageError),
    /// Rejected request body field or query parameter.
    Validation(ValidationError),
}

impl From<MessageError> for AppError {
    fn from(e: MessageError) -> Self {
        AppError::Message(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Message(MessageError::InvalidFormat(_)) => StatusCode::BAD_REQUEST,
            AppError::Message(MessageError::InappropriateContent(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Message(MessageError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Message(MessageError::DuplicateMessage(_)) => StatusCode::CONFLICT,
            AppError::Message(MessageError::StorageError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(e) => {
                tracing::debug!(field = %e.field, reason = %e.reason, "request rejected");
                ApiError::new(
                    "VALIDATION_ERROR",
                    "Invalid request data",
                    format!("Field '{}': {}", e.field, e.reason),
                )
            }
            AppError::Message(e) => {
                if let MessageError::StorageError(cause) = e {
                    tracing::error!(%cause, "storage failure");
                }
                ApiError::new(e.code(), e.message(), e.details())
            }
        };

        (status, Json(body)).into_response()
    }
}
