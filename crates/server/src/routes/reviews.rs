use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use super::auth::{AuthenticatedUser, ServerState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    #[serde(default)]
    pub review: String,
}

pub async fn put_review(
    State(state): State<ServerState>,
    Path(isbn): Path<String>,
    Extension(AuthenticatedUser(username)): Extension<AuthenticatedUser>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reviews = state
        .reviews
        .upsert_review(&isbn, &username, &body.review)
        .await?;
    Ok(Json(json!({
        "message": "Review added/updated successfully",
        "reviews": reviews,
    })))
}

pub async fn delete_review(
    State(state): State<ServerState>,
    Path(isbn): Path<String>,
    Extension(AuthenticatedUser(username)): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reviews = state.reviews.delete_review(&isbn, &username).await?;
    Ok(Json(json!({
        "message": "Review deleted successfully",
        "reviews": reviews,
    })))
}
