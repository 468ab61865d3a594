use crate::error::{AppError, Result};
use axum::{Json, Router, extract::Path, routing::get};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: String,
    pub name: String,
}

/// Raises on `ex` and leaves the error to the container's error pages.
pub struct ApiExceptionController;

impl ApiExceptionController {
    pub fn router() -> Router {
        Router::new().route("/api/members/{id}", get(Self::get_member))
    }

    async fn get_member(Path(id): Path<String>) -> Result<Json<Member>> {
        if id == "ex" {
            return Err(AppError::runtime("invalid user"));
        }

        let name = format!("hello{id}");
        Ok(Json(Member { member_id: id, name }))
    }
}
