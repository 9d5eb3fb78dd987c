//! Property Error Types
//!
//! Listing-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Property-specific result type alias
pub type PropertyResult<T> = Result<T, PropertyError>;

#[derive(Debug, Error)]
pub enum PropertyError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("At most {max} images can be uploaded per property")]
    TooManyImages { max: usize },

    #[error("Image exceeds the {max_bytes} byte limit")]
    ImageTooLarge { max_bytes: usize },

    /// Upload body could not be read
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Property not found")]
    NotFound,

    /// Caller is authenticated but did not create the listing
    #[error("Only the creator of a property can delete it")]
    NotOwner,

    /// Uploads area read/write failure
    #[error("Image storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PropertyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PropertyError::Validation(_) | PropertyError::TooManyImages { .. } => {
                ErrorKind::BadRequest
            }
            PropertyError::ImageTooLarge { .. } => ErrorKind::PayloadTooLarge,
            PropertyError::Multipart(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ErrorKind::PayloadTooLarge
            }
            PropertyError::Multipart(_) => ErrorKind::BadRequest,
            PropertyError::NotFound => ErrorKind::NotFound,
            PropertyError::NotOwner => ErrorKind::Forbidden,
            PropertyError::Storage(_) | PropertyError::Database(_) | PropertyError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError, keeping the cause attached for logs
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        let message = self.to_string();
        match self {
            PropertyError::TooManyImages { max } => AppError::new(kind, message)
                .with_action(format!("Select no more than {max} images")),
            PropertyError::Storage(e) => AppError::new(kind, message).with_source(e),
            PropertyError::Database(e) => AppError::new(kind, message).with_source(e),
            _ => AppError::new(kind, message),
        }
    }

    fn log(&self) {
        match self {
            PropertyError::Database(e) => {
                tracing::error!(error = %e, "Property database error");
            }
            PropertyError::Storage(e) => {
                tracing::error!(error = %e, "Property image storage error");
            }
            PropertyError::Internal(msg) => {
                tracing::error!(message = %msg, "Property internal error");
            }
            PropertyError::NotOwner => {
                tracing::warn!("Rejected delete by non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Property error");
            }
        }
    }
}

impl IntoResponse for PropertyError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PropertyError::Validation("Title is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PropertyError::TooManyImages { max: 5 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PropertyError::ImageTooLarge { max_bytes: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(PropertyError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PropertyError::NotOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            PropertyError::Storage(std::io::Error::other("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let app = PropertyError::Internal("row 7 is corrupt".into()).into_app_error();
        assert!(app.is_server_error());
        assert!(!app.public_detail().contains("row 7"));
    }
}
