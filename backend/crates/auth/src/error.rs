//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    UserNameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    /// Wrong password (or unknown user on the login path)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Access denied. No token provided")]
    MissingToken,

    /// Bad signature, malformed token or token minted for another purpose
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    /// Password strength policy violation
    #[error("{0}")]
    WeakPassword(String),

    /// Reset token is not the one currently on record, or has expired
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredResetToken,

    /// Reset mail could not be delivered; the stored token stays valid
    #[error("Failed to send password reset email: {0}")]
    MailDelivery(#[from] platform::mail::MailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::UserNameTaken
            | AuthError::EmailTaken
            | AuthError::WeakPassword(_)
            | AuthError::InvalidOrExpiredResetToken => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::ExpiredToken => {
                ErrorKind::Unauthorized
            }
            AuthError::InvalidToken => ErrorKind::Forbidden,
            AuthError::MailDelivery(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError, keeping the cause attached for logs
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        let message = self.to_string();
        match self {
            AuthError::WeakPassword(_) => AppError::new(kind, message).with_action(
                platform::password::PASSWORD_POLICY_HINT,
            ),
            AuthError::MailDelivery(e) => AppError::new(kind, message).with_source(e),
            AuthError::Database(e) => AppError::new(kind, message).with_source(e),
            _ => AppError::new(kind, message),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::MailDelivery(e) => {
                tracing::error!(error = %e, "Password reset mail failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected token with bad signature or purpose");
            }
            AuthError::InvalidOrExpiredResetToken => {
                tracing::warn!("Rejected password reset token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Signing(e) => AuthError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::UserNameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::ExpiredToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::InvalidOrExpiredResetToken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_weak_password_carries_policy_hint() {
        let app = AuthError::WeakPassword("Password must contain a number".into()).into_app_error();
        assert_eq!(app.action(), Some(platform::password::PASSWORD_POLICY_HINT));
    }
}
