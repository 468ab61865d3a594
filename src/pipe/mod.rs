use async_trait::async_trait;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub mod binding;
pub mod extract;
pub mod validation;

pub use binding::{Bind, BindingResult, QueryParams};
pub use extract::Valid;
pub use validation::{Validate, ValidationPipe, Violation, Violations};

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("Transformation failed: {0}")]
    Transformation(String),
}

/// The Pipe trait for transformation and validation
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}

impl IntoResponse for PipeError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;

        let mut body = json!({
            "statusCode": status.as_u16(),
            "message": self.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let PipeError::Validation(violations) = &self {
            body["errors"] = json!(violations);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validation_error_body_lists_violations() {
        let mut violations = Violations::new();
        violations.push(Violation::new("quantity", "Max", "must be at most 9999").rejected(99999));

        let response = PipeError::Validation(violations).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["errors"][0]["field"], "quantity");
        assert_eq!(body["errors"][0]["rule"], "Max");
        assert_eq!(body["errors"][0]["rejectedValue"], "99999");
    }
}
