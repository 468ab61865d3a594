//! Application assembly.
//!
//! ```text
//! client → ErrorPageLayer → LogInterceptor → Router → [ExceptionFilterLayer] → handler
//! ```

use crate::config::AppConfig;
use crate::controller::{
    ApiExceptionController, ApiExceptionV2Controller, ErrorPageController,
    ValidationTestController,
};
use crate::dispatch::{ErrorPageLayer, ErrorPageRegistry};
use crate::error::AppError;
use crate::interceptor::{LogInterceptor, SharedInterceptorLayer};
use axum::{Router, http::Uri};
use tower::Layer;

/// Build the full application router.
pub fn build_app(config: &AppConfig) -> Router {
    let routes = Router::new()
        .merge(ValidationTestController::router())
        .merge(ApiExceptionController::router())
        .merge(ApiExceptionV2Controller::router(
            config.exception_status.clone(),
        ))
        .merge(ErrorPageController::router())
        .fallback(not_found)
        .layer(SharedInterceptorLayer::new(vec![Box::new(LogInterceptor::new())]));

    // The error page layer has to see the whole router so that its forwards
    // can reach the error page routes.
    let error_pages =
        ErrorPageLayer::new(ErrorPageRegistry::with_defaults(), config.server_name.clone());

    Router::new().fallback_service(error_pages.layer(routes))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorResult;
    use crate::config::ConfigService;
    use crate::test_support::LogCapture;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::ACCEPT},
        response::Response,
    };
    use tower::ServiceExt;

    async fn get(uri: &str) -> Response {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        build_app(&AppConfig::default()).oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn body_text(response: Response) -> String {
        String::from_utf8(body_bytes(response).await).unwrap()
    }

    fn violated_fields(body: &serde_json::Value) -> Vec<String> {
        let mut fields: Vec<String> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        fields.dedup();
        fields
    }

    #[tokio::test]
    async fn test_validation_accepts_valid_item() {
        let response = get("/validation-test?id=10&itemName=hong&price=1010&quantity=99").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_validation_rejects_quantity_over_max() {
        let response =
            get("/validation-test?id=10&itemName=hong&price=1010&quantity=99999").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(violated_fields(&body), vec!["quantity"]);
    }

    #[tokio::test]
    async fn test_validation_names_exactly_the_violated_fields() {
        let response = get("/validation-test?id=10&itemName=%20&price=10&quantity=1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(violated_fields(&body), vec!["itemName", "price"]);

        let response = get("/validation-test?itemName=hong&price=abc&quantity=1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(violated_fields(&body), vec!["price"]);
        assert_eq!(body["errors"][0]["rule"], "typeMismatch");
    }

    #[tokio::test]
    async fn test_validation_handler_not_run_on_failure() {
        let capture = LogCapture::default();
        let _guard = capture.install();

        get("/validation-test?itemName=hong&price=1010").await;
        assert!(!capture.lines().iter().any(|l| l.starts_with("item = ")));

        get("/validation-test?itemName=hong&price=1010&quantity=1").await;
        assert!(capture.lines().iter().any(|l| l.starts_with("item = ")));
    }

    #[tokio::test]
    async fn test_v1_returns_member() {
        let response = get("/api/members/spring").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["memberId"], "spring");
        assert_eq!(body["name"], "hellospring");
    }

    #[tokio::test]
    async fn test_v1_sentinel_renders_500_page() {
        let response = get("/api/members/ex").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("500 error page"));
    }

    #[tokio::test]
    async fn test_v1_sentinel_answers_json_to_api_clients() {
        let request = Request::get("/api/members/ex")
            .header(ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();
        let response = build_app(&AppConfig::default())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], "invalid user");
    }

    #[tokio::test]
    async fn test_v2_maps_each_sentinel_to_its_own_status() {
        let response = get("/api2/members/ex").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let result: ErrorResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result, ErrorResult::new("EX", "internal error"));

        let response = get("/api2/members/bad").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let result: ErrorResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result, ErrorResult::new("BAD", "invalid input value"));
    }

    #[tokio::test]
    async fn test_v2_returns_member_dto() {
        let response = get("/api2/members/spring").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["name"], "spring");
        assert_eq!(body["age"], 20);
    }

    #[tokio::test]
    async fn test_v2_status_table_comes_from_config() {
        let config = ConfigService::default();
        config.set("EXCEPTION_STATUS_IllegalArgument", "422:INVALID");
        let app_config = AppConfig::from_service(&config).unwrap();

        let request = Request::get("/api2/members/bad")
            .body(Body::empty())
            .unwrap();
        let response = build_app(&app_config).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let result: ErrorResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.code, "INVALID");
    }

    #[tokio::test]
    async fn test_unknown_route_renders_404_page() {
        let response = get("/no-such-page").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("404 error page"));
    }

    #[tokio::test]
    async fn test_error_page_reachable_directly() {
        let response = get("/error-page/404").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("404 error page"));
    }

    #[test]
    fn test_log_interceptor_announced_on_build() {
        let capture = LogCapture::default();
        let _guard = capture.install();

        build_app(&AppConfig::default());
        assert_eq!(capture.lines(), vec!["LogInterceptor.init"]);
    }

    #[tokio::test]
    async fn test_request_and_error_dispatch_are_both_logged() {
        let capture = LogCapture::default();
        let _guard = capture.install();

        get("/api/members/ex").await;

        let lines = capture.lines();
        let trace: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with("REQUEST [") || l.starts_with("RESPONSE ["))
            .collect();
        assert_eq!(trace.len(), 4);
        assert!(trace[0].starts_with("REQUEST [/api/members/ex]"));
        assert!(trace[0].ends_with("[REQUEST]"));
        assert!(trace[1].starts_with("RESPONSE [/api/members/ex]"));
        assert!(trace[2].starts_with("REQUEST [/error-page/500]"));
        assert!(trace[2].ends_with("[ERROR]"));
        assert!(trace[3].starts_with("RESPONSE [/error-page/500]"));

        assert!(lines.contains(&"error.request_uri: Some(\"/api/members/ex\")".to_string()));
        assert!(lines.contains(&"error.servlet_name: Some(\"webbasic\")".to_string()));
    }
}
