use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

pub mod layer;
pub mod logging;

pub use layer::SharedInterceptorLayer;
pub use logging::LogInterceptor;

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

type NextFn =
    Box<dyn FnOnce(Request<Body>) -> Pin<Box<dyn Future<Output = InterceptorResult> + Send>> + Send>;

/// Represents the next handler in the chain
pub struct Next {
    pub(crate) run: NextFn,
}

impl Next {
    /// Create a new Next handler
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> Pin<Box<dyn Future<Output = InterceptorResult> + Send>>
            + Send
            + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors can inspect the request before it reaches the handler,
/// and inspect the response after the handler returns. A handler error
/// arrives as `Err`; returning it keeps it raised.
///
/// # Example
/// ```
/// use webbasic::interceptor::{Interceptor, InterceptorResult, Next};
/// use webbasic::async_trait;
/// use axum::{body::Body, http::Request};
///
/// struct TimingInterceptor;
///
/// #[async_trait]
/// impl Interceptor for TimingInterceptor {
///     async fn intercept(&self, req: Request<Body>, next: Next) -> InterceptorResult {
///         let start = std::time::Instant::now();
///         let res = next.run(req).await;
///         tracing::info!("took {:?}", start.elapsed());
///         res
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
