//! Error handling module
//!
//! Provides the unified error type returned by every handler and its mapping
//! onto the plain-text HTTP responses clients see.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Body sent for every store-side failure. Details stay in the log.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg,
            AppError::Database(e) => {
                error!("Error executing query: {:?}", e);
                SERVER_ERROR_MESSAGE.to_string()
            }
            AppError::Pool(e) => {
                error!("Error acquiring database connection: {}", e);
                SERVER_ERROR_MESSAGE.to_string()
            }
            AppError::Config(msg) => {
                error!("Configuration error: {}", msg);
                SERVER_ERROR_MESSAGE.to_string()
            }
        };

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

/// Helper function to create a not found error
pub fn not_found_error(msg: impl Into<String>) -> AppError {
    AppError::NotFound(msg.into())
}
