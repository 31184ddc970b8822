use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::qr::QrEncodeError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("QR encoding error")]
    QrEncoding(#[from] QrEncodeError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::QrEncoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::QrEncoding(_) => "QR_ENCODING_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::QrEncoding(e) => {
                error!(error = ?e, "QR encoding error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            AppError::QrEncoding(_) => "Failed to generate QR code".to_string(),
        };

        // Do not expose internal details in the API response
        let details = None;

        error_response(code, public_message, details, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AppError::ValidationError("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::ValidationError("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolClosed).code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_response_status_matches_error() {
        let response = AppError::NotFound("Event with id 'x' was not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::DatabaseError(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
