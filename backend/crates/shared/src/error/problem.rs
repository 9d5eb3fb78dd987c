//! RFC 7807 rendering of [`AppError`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::app_error::AppError;

/// `application/problem+json` body
#[derive(Debug, Serialize)]
pub struct ProblemDetails<'a> {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: &'static str,
    pub status: u16,
    pub detail: &'a str,
    pub action: Option<&'a str>,
}

impl<'a> From<&'a AppError> for ProblemDetails<'a> {
    fn from(err: &'a AppError) -> Self {
        let status = err.status_code();
        Self {
            problem_type: format!("https://httpstatuses.io/{status}"),
            title: err.kind().title(),
            status,
            detail: err.public_detail(),
            action: err.action(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(ProblemDetails::from(&self))).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::app_error::GENERIC_SERVER_ERROR_DETAIL;

    #[test]
    fn test_client_error_body() {
        let err = AppError::bad_request("Select no more than 5 images")
            .with_action("Remove an image and retry");
        let body = serde_json::to_value(ProblemDetails::from(&err)).unwrap();
        assert_eq!(body["type"], "https://httpstatuses.io/400");
        assert_eq!(body["title"], "Bad Request");
        assert_eq!(body["status"], 400);
        assert_eq!(body["detail"], "Select no more than 5 images");
        assert_eq!(body["action"], "Remove an image and retry");
    }

    #[test]
    fn test_server_error_response_hides_message() {
        let err = AppError::internal("password authentication failed for user postgres");
        let body = serde_json::to_value(ProblemDetails::from(&err)).unwrap();
        assert_eq!(body["detail"], GENERIC_SERVER_ERROR_DETAIL);
        assert!(body["action"].is_null());

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
