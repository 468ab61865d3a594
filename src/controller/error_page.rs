use crate::common::View;
use crate::dispatch::attributes::ATTRIBUTE_NAMES;
use crate::dispatch::{DispatchType, ErrorAttributes};
use axum::{
    Extension, Json, Router,
    http::{HeaderMap, StatusCode, header::ACCEPT},
    response::{IntoResponse, Response},
    routing::any,
};
use serde_json::json;

pub const ERROR_404_VIEW: &str = "error-page/404";
pub const ERROR_500_VIEW: &str = "error-page/500";

/// Targets of the container's error dispatch.
///
/// Both pages can also be requested directly; every attribute then reads as
/// absent.
pub struct ErrorPageController;

impl ErrorPageController {
    pub fn router() -> Router {
        Router::new()
            .route("/error-page/404", any(Self::error_404))
            .route("/error-page/500", any(Self::error_500))
    }

    async fn error_404(
        attributes: Option<Extension<ErrorAttributes>>,
        dispatch: Option<Extension<DispatchType>>,
    ) -> View {
        print_error_info(&unwrap_attributes(attributes), unwrap_dispatch(dispatch));
        View::new(ERROR_404_VIEW)
    }

    async fn error_500(
        headers: HeaderMap,
        attributes: Option<Extension<ErrorAttributes>>,
        dispatch: Option<Extension<DispatchType>>,
    ) -> Response {
        let attributes = unwrap_attributes(attributes);
        print_error_info(&attributes, unwrap_dispatch(dispatch));

        if accepts_json(&headers) {
            let status = attributes
                .status_code
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            return Json(json!({
                "status": status,
                "message": attributes.message,
            }))
            .into_response();
        }

        View::new(ERROR_500_VIEW).into_response()
    }
}

fn unwrap_attributes(attributes: Option<Extension<ErrorAttributes>>) -> ErrorAttributes {
    attributes
        .map(|Extension(attributes)| attributes)
        .unwrap_or_default()
}

fn unwrap_dispatch(dispatch: Option<Extension<DispatchType>>) -> DispatchType {
    dispatch.map(|Extension(dispatch)| dispatch).unwrap_or_default()
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

fn print_error_info(attributes: &ErrorAttributes, dispatch: DispatchType) {
    for name in ATTRIBUTE_NAMES {
        tracing::info!("{}: {:?}", name, attributes.get(name));
    }
    tracing::info!("dispatchType={}", dispatch);
}
