use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Classification of raised errors.
///
/// The kind is what exception filters and error pages key on, so the
/// variant names double as configuration keys (`EXCEPTION_STATUS_<Kind>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ErrorKind {
    RuntimeError,
    IllegalArgument,
    NotFound,
    Internal,
}

impl ErrorKind {
    /// Status used when nothing translates the error.
    pub fn default_status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors raised by request handlers.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    Runtime(String),

    #[error("{0}")]
    IllegalArgument(String),

    #[error("No handler found for {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Runtime(_) => ErrorKind::RuntimeError,
            AppError::IllegalArgument(_) => ErrorKind::IllegalArgument,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().default_status()
    }

    /// `Kind: message`, the form recorded as the `error.exception` attribute.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }

    /// Recover an `AppError` from a type-erased interceptor error.
    pub fn from_boxed(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match error.downcast::<AppError>() {
            Ok(app_error) => *app_error,
            Err(other) => AppError::Internal(other.to_string()),
        }
    }
}

/// Marks a response as carrying an error nobody has translated yet.
#[derive(Debug, Clone)]
pub(crate) struct Raised(pub AppError);

/// Remove the raised error from a response, if any.
pub(crate) fn take_raised(response: &mut Response) -> Option<AppError> {
    response.extensions_mut().remove::<Raised>().map(|raised| raised.0)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response =
            (status, status.canonical_reason().unwrap_or_default()).into_response();
        response.extensions_mut().insert(Raised(self));
        response
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown error kind in {key}")]
    UnknownErrorKind { key: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}
