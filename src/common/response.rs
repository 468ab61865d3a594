use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Body of a translated error.
///
/// # Example
/// ```
/// use webbasic::common::ErrorResult;
/// use axum::http::StatusCode;
/// use axum::response::IntoResponse;
///
/// let response = ErrorResult::new("BAD", "invalid input value")
///     .with_status(StatusCode::BAD_REQUEST)
///     .into_response();
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub code: String,
    pub message: String,
}

impl ErrorResult {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn with_status(self, status: StatusCode) -> ErrorResponse {
        ErrorResponse {
            status,
            body: self,
        }
    }
}

/// An [`ErrorResult`] paired with the status it is sent with.
#[derive(Debug)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: ErrorResult,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
