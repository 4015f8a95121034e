//! Error types for the library catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error kinds reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    ValidationError = 1,
    NotFoundError = 2,
    UnavailableError = 3,
    StorageError = 4,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mirror store error: {0}")]
    Mirror(#[from] mongodb::error::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) | AppError::MethodNotAllowed(_) => ErrorCode::ValidationError,
            AppError::NotFound(_) => ErrorCode::NotFoundError,
            AppError::Unavailable(_) => ErrorCode::UnavailableError,
            AppError::Database(_) | AppError::Mirror(_) | AppError::Storage(_) => {
                ErrorCode::StorageError
            }
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Mirror(e) => {
                tracing::error!("Mirror store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Mirror store error".to_string())
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
