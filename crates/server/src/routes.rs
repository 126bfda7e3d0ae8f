use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod auth;
pub mod books;
pub mod pages;
pub mod reviews;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public catalog reads, registration and
/// login, and token-protected review mutations.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    // Public routes: browser index, health, catalog reads, auth
    let public = Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health))
        .route("/books", get(books::get_books))
        .route("/isbn/:isbn", get(books::get_by_isbn))
        .route("/author/:author", get(books::get_by_author))
        .route("/title/:title", get(books::get_by_title))
        .route("/review/:isbn", get(books::get_reviews))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Review mutations require a verified bearer token
    let protected = Router::new()
        .route(
            "/review/:isbn",
            put(reviews::put_review).delete(reviews::delete_review),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
