use crate::common::ErrorResult;
use crate::error::{AppError, ErrorKind};
use crate::exception::{ArgumentsHost, ExceptionFilter};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// Message sent instead of the error's own for 5xx translations.
const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Status and error code an error kind translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
    pub status: StatusCode,
    pub code: String,
}

impl StatusMapping {
    pub fn new(status: StatusCode, code: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
        }
    }

    /// Parse `status` or `status:CODE`; a bare status keeps `default_code`.
    pub fn parse(value: &str, default_code: &str) -> Option<Self> {
        let (status, code) = match value.split_once(':') {
            Some((status, code)) => (status.trim(), code.trim()),
            None => (value.trim(), default_code),
        };
        let status = status.parse::<u16>().ok()?;
        let status = StatusCode::from_u16(status).ok()?;
        if code.is_empty() {
            return None;
        }
        Some(Self::new(status, code))
    }
}

/// Error kind to status table used by [`HttpExceptionFilter`].
#[derive(Debug, Clone)]
pub struct ExceptionStatusTable {
    entries: HashMap<ErrorKind, StatusMapping>,
}

impl Default for ExceptionStatusTable {
    fn default() -> Self {
        Self::empty()
            .with(
                ErrorKind::IllegalArgument,
                StatusMapping::new(StatusCode::BAD_REQUEST, "BAD"),
            )
            .with(
                ErrorKind::RuntimeError,
                StatusMapping::new(StatusCode::INTERNAL_SERVER_ERROR, "EX"),
            )
    }
}

impl ExceptionStatusTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, kind: ErrorKind, mapping: StatusMapping) -> Self {
        self.set(kind, mapping);
        self
    }

    pub fn set(&mut self, kind: ErrorKind, mapping: StatusMapping) {
        self.entries.insert(kind, mapping);
    }

    pub fn get(&self, kind: ErrorKind) -> Option<&StatusMapping> {
        self.entries.get(&kind)
    }
}

/// Translates raised errors into an [`ErrorResult`] body using a status table.
///
/// Kinds missing from the table are left raised.
#[derive(Default)]
pub struct HttpExceptionFilter {
    table: ExceptionStatusTable,
}

impl HttpExceptionFilter {
    pub fn new(table: ExceptionStatusTable) -> Self {
        Self { table }
    }
}

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: &AppError, host: &ArgumentsHost) -> Option<Response> {
        let mapping = self.table.get(error.kind())?;

        tracing::error!(
            kind = %error.kind(),
            method = %host.method,
            uri = %host.uri,
            "[exceptionHandle] {}",
            error
        );

        let message = if mapping.status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            error.to_string()
        };

        Some(
            ErrorResult::new(mapping.code.clone(), message)
                .with_status(mapping.status)
                .into_response(),
        )
    }
}
