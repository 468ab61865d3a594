use crate::error::{Raised, take_raised};
use crate::exception::{ArgumentsHost, ExceptionFilter};
use axum::{body::Body, http::Request, response::Response};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer that offers raised errors to a chain of ExceptionFilters.
///
/// Meant as a route layer: only errors raised by the wrapped routes are
/// translated. The first filter returning a response wins.
#[derive(Clone)]
pub struct ExceptionFilterLayer {
    filters: Arc<Vec<Box<dyn ExceptionFilter>>>,
}

impl ExceptionFilterLayer {
    pub fn new(filters: Vec<Box<dyn ExceptionFilter>>) -> Self {
        Self {
            filters: Arc::new(filters),
        }
    }
}

impl<S> Layer<S> for ExceptionFilterLayer {
    type Service = ExceptionFilterMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionFilterMiddleware {
            inner,
            filters: self.filters.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ExceptionFilterMiddleware<S> {
    inner: S,
    filters: Arc<Vec<Box<dyn ExceptionFilter>>>,
}

impl<S> Service<Request<Body>> for ExceptionFilterMiddleware<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let filters = self.filters.clone();
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let host = ArgumentsHost::from_request(&request);
            let mut response = inner.call(request).await?;

            let Some(error) = take_raised(&mut response) else {
                return Ok(response);
            };

            for filter in filters.iter() {
                if let Some(translated) = filter.catch(&error, &host) {
                    return Ok(translated);
                }
            }

            // Nobody translated it: keep it raised.
            response.extensions_mut().insert(Raised(error));
            Ok(response)
        })
    }
}
