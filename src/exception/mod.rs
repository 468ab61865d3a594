use crate::dispatch::DispatchType;
use crate::error::AppError;
use axum::http::{Method, Request, Uri};
use axum::response::Response;

pub mod http;
pub mod layer;

pub use http::{ExceptionStatusTable, HttpExceptionFilter, StatusMapping};
pub use layer::ExceptionFilterLayer;

/// Context for exception handling: the request that raised the error.
#[derive(Debug, Clone)]
pub struct ArgumentsHost {
    pub method: Method,
    pub uri: Uri,
    pub dispatch: DispatchType,
}

impl ArgumentsHost {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            dispatch: DispatchType::of(request),
        }
    }
}

/// The ExceptionFilter trait
///
/// Filters translate errors raised during request processing into
/// responses. Returning `None` leaves the error raised for the next filter,
/// or for the container's error pages when no filter takes it.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and optionally return a response
    fn catch(&self, error: &AppError, host: &ArgumentsHost) -> Option<Response>;
}
