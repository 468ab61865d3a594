use crate::dispatch::{DispatchType, ErrorAttributes, ErrorPageRegistry};
use crate::error::take_raised;
use axum::{
    body::Body,
    http::{Method, Request, header::ACCEPT},
    response::Response,
};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service, ServiceExt};

/// Tower Layer that forwards untranslated errors to registered error pages.
///
/// Must wrap the whole application: the forward is dispatched through the
/// same inner service, so the error page route has to be reachable from it.
#[derive(Clone)]
pub struct ErrorPageLayer {
    registry: Arc<ErrorPageRegistry>,
    servlet_name: Arc<str>,
}

impl ErrorPageLayer {
    pub fn new(registry: ErrorPageRegistry, servlet_name: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(registry),
            servlet_name: Arc::from(servlet_name.into()),
        }
    }
}

impl<S> Layer<S> for ErrorPageLayer {
    type Service = ErrorPageMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorPageMiddleware {
            inner,
            registry: self.registry.clone(),
            servlet_name: self.servlet_name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ErrorPageMiddleware<S> {
    inner: S,
    registry: Arc<ErrorPageRegistry>,
    servlet_name: Arc<str>,
}

impl<S> Service<Request<Body>> for ErrorPageMiddleware<S>
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
        // Keep the service that was driven to readiness, leave a clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let registry = self.registry.clone();
        let servlet_name = self.servlet_name.clone();

        Box::pin(async move {
            let dispatch = DispatchType::of(&request);
            let request_uri = request.uri().path().to_string();
            let accept = request.headers().get(ACCEPT).cloned();

            let mut response = inner.call(request).await?;

            // Error dispatches render whatever they produce.
            if dispatch == DispatchType::Error {
                return Ok(response);
            }

            let Some(error) = take_raised(&mut response) else {
                return Ok(response);
            };
            let status = response.status();

            let Some(path) = registry.resolve(error.kind(), status) else {
                tracing::warn!(%status, uri = %request_uri, "no error page registered");
                return Ok(response);
            };

            let mut forward = match Request::builder()
                .method(Method::GET)
                .uri(path)
                .body(Body::empty())
            {
                Ok(forward) => forward,
                Err(e) => {
                    tracing::error!(path, "invalid error page path: {}", e);
                    return Ok(response);
                }
            };
            if let Some(accept) = accept {
                forward.headers_mut().insert(ACCEPT, accept);
            }
            forward.extensions_mut().insert(DispatchType::Error);
            forward.extensions_mut().insert(ErrorAttributes::from_error(
                &error,
                status,
                request_uri,
                servlet_name.as_ref(),
            ));

            let mut page = inner.oneshot(forward).await?;
            take_raised(&mut page);

            // The page renders the body; the client still sees the original status.
            let (mut parts, body) = page.into_parts();
            parts.status = status;
            Ok(Response::from_parts(parts, body))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ErrorPage;
    use crate::error::{AppError, ErrorKind, Raised};
    use axum::{Extension, Router, extract::State, http::StatusCode, routing::get};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn boom() -> Result<&'static str, AppError> {
        Err(AppError::runtime("invalid user"))
    }

    async fn illegal() -> Result<&'static str, AppError> {
        Err(AppError::illegal_argument("invalid input value"))
    }

    async fn page(
        attributes: Option<Extension<ErrorAttributes>>,
        dispatch: Option<Extension<DispatchType>>,
    ) -> String {
        let attributes = attributes.map(|Extension(a)| a).unwrap_or_default();
        let dispatch = dispatch.map(|Extension(d)| d).unwrap_or_default();
        format!(
            "{}|{}|{}",
            dispatch,
            attributes.request_uri.unwrap_or_default(),
            attributes.message.unwrap_or_default()
        )
    }

    async fn broken_page(State(calls): State<Arc<AtomicUsize>>) -> Result<&'static str, AppError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::runtime("page failed"))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn service() -> ErrorPageMiddleware<Router> {
        let router = Router::new()
            .route("/boom", get(boom))
            .route("/illegal", get(illegal))
            .route("/error-page/500", get(page));
        let registry = ErrorPageRegistry::new().register(ErrorPage::for_kind(
            ErrorKind::RuntimeError,
            "/error-page/500",
        ));
        ErrorPageLayer::new(registry, "test").layer(router)
    }

    #[tokio::test]
    async fn test_forwards_raised_error_to_page() {
        let request = Request::get("/boom").body(Body::empty()).unwrap();
        let response = service().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "ERROR|/boom|invalid user");
    }

    #[tokio::test]
    async fn test_unregistered_error_keeps_default_response() {
        let request = Request::get("/illegal").body(Body::empty()).unwrap();
        let response = service().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_direct_page_request_is_not_forwarded() {
        let request = Request::get("/error-page/500").body(Body::empty()).unwrap();
        let response = service().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "REQUEST||");
    }

    #[tokio::test]
    async fn test_failing_page_is_not_forwarded_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/boom", get(boom))
            .route("/error-page/500", get(broken_page))
            .with_state(calls.clone());
        let registry = ErrorPageRegistry::new().register(ErrorPage::for_kind(
            ErrorKind::RuntimeError,
            "/error-page/500",
        ));
        let service = ErrorPageLayer::new(registry, "test").layer(router);

        let request = Request::get("/boom").body(Body::empty()).unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Raised>().is_none());
        assert_eq!(body_string(response).await, "Internal Server Error");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
