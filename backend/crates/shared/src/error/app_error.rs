//! The error every handler ultimately answers with.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Sent instead of the message of any 5xx error.
pub const GENERIC_SERVER_ERROR_DETAIL: &str =
    "Something went wrong on our side. Please try again later.";

type Source = Box<dyn Error + Send + Sync + 'static>;

/// A classified, user-facing error.
///
/// `message` and `action` are shown to the client (except for 5xx, see
/// [`AppError::public_detail`]); `source` only ever reaches the logs.
///
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::bad_request("Password is too weak")
///     .with_action("Use at least 8 characters");
/// assert_eq!(err.status_code(), 400);
/// assert_eq!(err.action(), Some("Use at least 8 characters"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    source: Option<Source>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// Hint telling the client how to recover
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// The message, or [`GENERIC_SERVER_ERROR_DETAIL`] for server errors.
    pub fn public_detail(&self) -> &str {
        if self.is_server_error() {
            GENERIC_SERVER_ERROR_DETAIL
        } else {
            &self.message
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(AppError::bad_request("x").kind(), ErrorKind::BadRequest);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(
            AppError::new(ErrorKind::Forbidden, "Not yours").message(),
            "Not yours"
        );
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let err = AppError::internal("Could not store image")
            .with_source(std::io::Error::other("disk full"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Internal Server Error: Could not store image");
    }

    #[test]
    fn test_public_detail_hides_server_messages() {
        let err = AppError::internal("connection refused: 10.0.0.3:5432");
        assert_eq!(err.public_detail(), GENERIC_SERVER_ERROR_DETAIL);

        let err = AppError::bad_request("Title is required");
        assert_eq!(err.public_detail(), "Title is required");
    }
}
