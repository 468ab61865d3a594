//! # webbasic
//!
//! A small web service showing request validation, exception-to-status
//! mapping, container error pages and request logging through an
//! interceptor chain, built on axum.
//!
//! ## Routes
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/validation-test?id&itemName&price&quantity` | 200 `ok` | 400 + field violations |
//! | GET | `/api/members/{id}` | 200 `{memberId,name}` | 500 error page (`id=ex`) |
//! | GET | `/api2/members/{id}` | 200 `{name,age}` | 500 `EX` (`id=ex`), 400 `BAD` (`id=bad`) |
//! | * | `/error-page/404`, `/error-page/500` | rendered view | |
//!
//! ## Layers
//!
//! - [`interceptor`]: filter chain; [`interceptor::LogInterceptor`] traces
//!   every request pass with a correlation id.
//! - [`pipe`]: binding and validation ahead of handlers.
//! - [`exception`]: translation of raised errors into statuses and
//!   [`common::ErrorResult`] bodies.
//! - [`dispatch`]: the container part, forwarding untranslated errors to
//!   error pages.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webbasic::{AppConfig, ConfigService, build_app};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_service(&ConfigService::new())?;
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, build_app(&config)).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod common;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod exception;
pub mod interceptor;
pub mod lifecycle;
pub mod model;
pub mod pipe;

#[cfg(test)]
mod test_support;

// Re-export core types
pub use app::build_app;
pub use common::ErrorResult;
pub use config::{AppConfig, ConfigService};
pub use error::{AppError, ConfigError, ErrorKind, Result};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use webbasic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ErrorResult, View};
    pub use crate::config::{AppConfig, ConfigService};
    pub use crate::dispatch::{DispatchType, ErrorAttributes, ErrorPage, ErrorPageRegistry};
    pub use crate::error::{AppError, ErrorKind, Result};
    pub use crate::exception::{
        ArgumentsHost, ExceptionFilter, ExceptionFilterLayer, ExceptionStatusTable,
        HttpExceptionFilter,
    };
    pub use crate::interceptor::{
        Interceptor, InterceptorResult, LogInterceptor, Next, SharedInterceptorLayer,
    };
    pub use crate::pipe::{Bind, Pipe, PipeError, Valid, Validate, Violation, Violations};
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
}
