use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use service::catalog::Book;

use super::auth::ServerState;
use crate::errors::ApiError;

pub async fn get_books(State(state): State<ServerState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.catalog.get_all().await?))
}

pub async fn get_by_isbn(
    State(state): State<ServerState>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    Ok(Json(state.catalog.get_by_isbn(&isbn).await?))
}

pub async fn get_by_author(
    State(state): State<ServerState>,
    Path(author): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.catalog.get_by_author(&author).await?))
}

pub async fn get_by_title(
    State(state): State<ServerState>,
    Path(title): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.catalog.get_by_title(&title).await?))
}

pub async fn get_reviews(
    State(state): State<ServerState>,
    Path(isbn): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reviews = state.catalog.get_reviews(&isbn).await?;
    Ok(Json(json!({ "reviews": reviews })))
}
