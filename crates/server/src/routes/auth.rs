use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::json;
use tracing::warn;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::memory::MemoryUserRepository;
use service::auth::token::{self, TokenStatus};
use service::auth::AuthService;
use service::catalog::CatalogStore;
use service::review::ReviewManager;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<CatalogStore>,
    pub reviews: Arc<ReviewManager>,
    pub auth_service: Arc<AuthService<MemoryUserRepository>>,
    pub auth: ServerAuthConfig,
}

/// Identity taken from a verified bearer token; inserted into request
/// extensions by [`require_bearer_token`].
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub String);

pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    state.auth_service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state.auth_service.login(input).await?;
    Ok(Json(json!({
        "message": "Login successful!",
        "token": session.token,
    })))
}

/// Middleware guarding review mutations: requires `Authorization: Bearer
/// <token>`. A missing token is 401; a malformed, tampered, or expired one
/// is 403.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let path = req.uri().path().to_owned();

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string());

    let token = match token {
        Some(t) => t,
        None => {
            warn!(%path, "missing bearer token");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "missing bearer token" })),
            ));
        }
    };

    match token::verify(&token, &state.auth.jwt_secret) {
        TokenStatus::Valid { username } => {
            req.extensions_mut().insert(AuthenticatedUser(username));
            Ok(next.run(req).await)
        }
        TokenStatus::Expired => {
            warn!(%path, "expired token");
            Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "token expired" })),
            ))
        }
        TokenStatus::Invalid => {
            warn!(%path, "invalid token");
            Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "invalid token" })),
            ))
        }
    }
}
