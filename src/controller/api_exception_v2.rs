use crate::error::{AppError, Result};
use crate::exception::{ExceptionFilterLayer, ExceptionStatusTable, HttpExceptionFilter};
use axum::{Json, Router, extract::Path, routing::get};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiExceptionMemberDto {
    pub name: String,
    pub age: u32,
}

/// Raises a distinct error kind per sentinel; an [`HttpExceptionFilter`]
/// scoped to these routes turns each into a status and an `ErrorResult`.
pub struct ApiExceptionV2Controller;

impl ApiExceptionV2Controller {
    pub fn router(table: ExceptionStatusTable) -> Router {
        Router::new()
            .route("/api2/members/{id}", get(Self::get_member))
            .route_layer(ExceptionFilterLayer::new(vec![Box::new(
                HttpExceptionFilter::new(table),
            )]))
    }

    async fn get_member(Path(id): Path<String>) -> Result<Json<ApiExceptionMemberDto>> {
        if id == "ex" {
            return Err(AppError::runtime("invalid user"));
        }

        if id == "bad" {
            return Err(AppError::illegal_argument("invalid input value"));
        }

        Ok(Json(ApiExceptionMemberDto { name: id, age: 20 }))
    }
}
