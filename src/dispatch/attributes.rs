use axum::http::StatusCode;

use crate::error::AppError;

pub const ERROR_EXCEPTION: &str = "error.exception";
pub const ERROR_EXCEPTION_TYPE: &str = "error.exception_type";
pub const ERROR_MESSAGE: &str = "error.message";
pub const ERROR_REQUEST_URI: &str = "error.request_uri";
pub const ERROR_SERVLET_NAME: &str = "error.servlet_name";
pub const ERROR_STATUS_CODE: &str = "error.status_code";

/// Attribute names in the order error pages report them.
pub const ATTRIBUTE_NAMES: [&str; 6] = [
    ERROR_EXCEPTION,
    ERROR_EXCEPTION_TYPE,
    ERROR_MESSAGE,
    ERROR_REQUEST_URI,
    ERROR_SERVLET_NAME,
    ERROR_STATUS_CODE,
];

/// Error context handed to an error page by the container.
///
/// Every attribute is optional: an error page reached directly by a client
/// sees none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorAttributes {
    pub exception: Option<String>,
    pub exception_type: Option<String>,
    pub message: Option<String>,
    pub request_uri: Option<String>,
    pub servlet_name: Option<String>,
    pub status_code: Option<u16>,
}

impl ErrorAttributes {
    pub fn from_error(
        error: &AppError,
        status: StatusCode,
        request_uri: impl Into<String>,
        servlet_name: impl Into<String>,
    ) -> Self {
        Self {
            exception: Some(error.describe()),
            exception_type: Some(error.kind().to_string()),
            message: Some(error.to_string()),
            request_uri: Some(request_uri.into()),
            servlet_name: Some(servlet_name.into()),
            status_code: Some(status.as_u16()),
        }
    }

    /// Look an attribute up by its `error.*` name.
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            ERROR_EXCEPTION => self.exception.clone(),
            ERROR_EXCEPTION_TYPE => self.exception_type.clone(),
            ERROR_MESSAGE => self.message.clone(),
            ERROR_REQUEST_URI => self.request_uri.clone(),
            ERROR_SERVLET_NAME => self.servlet_name.clone(),
            ERROR_STATUS_CODE => self.status_code.map(|code| code.to_string()),
            _ => None,
        }
    }
}
