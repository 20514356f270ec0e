//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::AmountError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// A rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Missing session cookie")]
    Unauthenticated,

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Validation error on a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        AppError::invalid_field("amount", err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_field("body", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid_field("id", rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details, fields) = match &self {
            // 400 Bad Request
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                None,
                fields.clone(),
            ),

            // 401 Unauthorized
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                Some("sessionId cookie is required".to_string()),
                Vec::new(),
            ),

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    None,
                    Vec::new(),
                )
            }
        };

        let error = match &self {
            // Don't leak driver messages to clients
            AppError::Database(_) => "Database error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
            fields,
        };

        (status, Json(body)).into_response()
    }
}
