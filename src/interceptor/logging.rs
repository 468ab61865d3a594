use crate::dispatch::DispatchType;
use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request};
use uuid::Uuid;

/// An interceptor that logs every request pass with a correlation id.
///
/// Emits `REQUEST [uri][uuid][dispatch]` before delegating and
/// `RESPONSE [uri][uuid][dispatch]` after, whatever the outcome.
#[derive(Clone, Default)]
pub struct LogInterceptor;

impl LogInterceptor {
    /// Creates the interceptor for registration in a chain.
    pub fn new() -> Self {
        tracing::info!("LogInterceptor.init");
        Self
    }

    /// Marks the end of the interceptor's lifetime, once the server has stopped.
    pub fn destroy() {
        tracing::info!("LogInterceptor.destroy");
    }
}

/// Logs the RESPONSE line when dropped, so every exit path is covered:
/// normal return, raised error, panic, or the request future being dropped.
struct ResponseLog {
    uri: String,
    uuid: Uuid,
    dispatch: DispatchType,
}

impl Drop for ResponseLog {
    fn drop(&mut self) {
        tracing::info!("RESPONSE [{}][{}][{}]", self.uri, self.uuid, self.dispatch);
    }
}

#[async_trait]
impl Interceptor for LogInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let uri = request.uri().path().to_string();
        let uuid = Uuid::new_v4();
        let dispatch = DispatchType::of(&request);

        tracing::info!("REQUEST [{}][{}][{}]", uri, uuid, dispatch);
        let _response_log = ResponseLog {
            uri,
            uuid,
            dispatch,
        };

        next.run(request).await
    }
}
