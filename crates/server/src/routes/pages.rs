use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use super::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub isbn: Option<String>,
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Simple HTML view for browser access: the whole catalog, or one isbn when
/// the `isbn` query parameter is given.
pub async fn index(
    State(state): State<ServerState>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, ApiError> {
    let books = state.catalog.get_all().await?;
    let isbn_query = params.isbn.unwrap_or_default().trim().to_string();

    let filtered: Vec<_> = if isbn_query.is_empty() {
        books.iter().collect()
    } else {
        books.iter().filter(|b| b.isbn == isbn_query).collect()
    };

    let items: String = filtered
        .iter()
        .map(|b| {
            format!(
                "<li><strong>{}</strong> by {} (ISBN: {}) - Reviews: {}</li>",
                escape(&b.title),
                escape(&b.author),
                escape(&b.isbn),
                b.reviews.len()
            )
        })
        .collect();

    let heading = if isbn_query.is_empty() {
        "All Books".to_string()
    } else {
        format!("Books for ISBN: {}", escape(&isbn_query))
    };
    let empty_state = if items.is_empty() {
        format!("<p>No books found for ISBN: {}</p>", escape(&isbn_query))
    } else {
        String::new()
    };

    Ok(Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"utf-8\" />\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n    <title>Book List</title>\n  </head>\n  <body>\n    <h1>{heading}</h1>\n    {empty_state}\n    <ul>{items}</ul>\n  </body>\n</html>\n"
    )))
}
