//! Container-side error dispatch.
//!
//! When a client request ends in an error nobody translated, the container
//! forwards a second, internal request to a registered error page. The
//! forwarded request carries [`DispatchType::Error`] and an
//! [`ErrorAttributes`] describing what went wrong.

use axum::http::Request;
use strum_macros::Display;

pub mod attributes;
pub mod error_page;
pub mod layer;

pub use attributes::ErrorAttributes;
pub use error_page::{ErrorPage, ErrorPageRegistry};
pub use layer::ErrorPageLayer;

/// Whether a request came from a client or from an internal forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DispatchType {
    #[default]
    Request,
    Error,
}

impl DispatchType {
    /// Dispatch type of a request; a request without one is a client request.
    pub fn of<B>(request: &Request<B>) -> Self {
        request
            .extensions()
            .get::<DispatchType>()
            .copied()
            .unwrap_or_default()
    }
}
