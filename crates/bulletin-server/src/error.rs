//! Error types for the bulletin server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bulletin_types::ErrorResponse;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BulletinError>;

#[derive(Error, Debug)]
pub enum BulletinError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Error returned to HTTP clients.
///
/// Only a fixed, generic message ever leaves the server; the underlying cause
/// is logged by the handler that produced it.
#[derive(Debug, Clone, Copy)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_is_500() {
        let err = ApiError::internal("Error fetching events");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Error fetching events");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_error_display() {
        let err = BulletinError::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("Database error:"));
    }
}
