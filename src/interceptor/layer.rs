use crate::error::{AppError, take_raised};
use crate::interceptor::{Interceptor, InterceptorError, InterceptorResult, Next};
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer for invoking a chain of Interceptors
///
/// Interceptors run in registration order: the first one wraps all the
/// others and the inner service.
#[derive(Clone)]
pub struct SharedInterceptorLayer {
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl SharedInterceptorLayer {
    pub fn new(interceptors: Vec<Box<dyn Interceptor>>) -> Self {
        Self {
            interceptors: Arc::new(interceptors),
        }
    }
}

impl<S> Layer<S> for SharedInterceptorLayer {
    type Service = InterceptorMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptorMiddleware {
            inner,
            interceptors: self.interceptors.clone(),
        }
    }
}

#[derive(Clone)]
pub struct InterceptorMiddleware<S> {
    inner: S,
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl<S> Service<Request<Body>> for InterceptorMiddleware<S>
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
        let interceptors = self.interceptors.clone();
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            // Base of the chain: the inner service. A raised handler error
            // travels up the chain as `Err`.
            let mut chain = Next::new(move |req| {
                Box::pin(async move {
                    let Ok(mut response) = inner.call(req).await;
                    match take_raised(&mut response) {
                        Some(error) => Err(Box::new(error) as InterceptorError),
                        None => Ok(response),
                    }
                })
            });

            // interceptors[0] wraps (interceptors[1] wraps ... (base))
            for i in (0..interceptors.len()).rev() {
                let interceptors = interceptors.clone();
                let next = chain;

                chain = Next::new(move |req| {
                    Box::pin(async move { interceptors[i].intercept(req, next).await })
                });
            }

            let result: InterceptorResult = chain.run(request).await;
            Ok(result.unwrap_or_else(|e| AppError::from_boxed(e).into_response()))
        })
    }
}
