use axum::http::StatusCode;

use crate::error::ErrorKind;

pub const ERROR_PAGE_404: &str = "/error-page/404";
pub const ERROR_PAGE_500: &str = "/error-page/500";

/// What an error page is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPageKey {
    Kind(ErrorKind),
    Status(StatusCode),
}

/// A path the container forwards to when a matching error occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub key: ErrorPageKey,
    pub path: String,
}

impl ErrorPage {
    pub fn for_status(status: StatusCode, path: impl Into<String>) -> Self {
        Self {
            key: ErrorPageKey::Status(status),
            path: path.into(),
        }
    }

    pub fn for_kind(kind: ErrorKind, path: impl Into<String>) -> Self {
        Self {
            key: ErrorPageKey::Kind(kind),
            path: path.into(),
        }
    }
}

/// Registered error pages, searched in registration order.
#[derive(Debug, Clone, Default)]
pub struct ErrorPageRegistry {
    pages: Vec<ErrorPage>,
}

impl ErrorPageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 404 and 500 pages, plus runtime errors routed to the 500 page.
    pub fn with_defaults() -> Self {
        Self::new()
            .register(ErrorPage::for_status(StatusCode::NOT_FOUND, ERROR_PAGE_404))
            .register(ErrorPage::for_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_PAGE_500,
            ))
            .register(ErrorPage::for_kind(ErrorKind::RuntimeError, ERROR_PAGE_500))
    }

    pub fn register(mut self, page: ErrorPage) -> Self {
        self.pages.push(page);
        self
    }

    /// Page for an error; a page registered for the error kind wins over one
    /// registered for the status.
    pub fn resolve(&self, kind: ErrorKind, status: StatusCode) -> Option<&str> {
        let by_kind = self
            .pages
            .iter()
            .find(|page| page.key == ErrorPageKey::Kind(kind));
        let by_status = || {
            self.pages
                .iter()
                .find(|page| page.key == ErrorPageKey::Status(status))
        };

        by_kind.or_else(by_status).map(|page| page.path.as_str())
    }
}
