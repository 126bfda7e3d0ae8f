use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// API-facing error owning the error-to-status mapping. Bearer-token
/// failures never reach this type; the middleware maps those itself.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(AuthError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::Conflict) => StatusCode::CONFLICT,
            ApiError::Auth(AuthError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::HashError(_)) | ApiError::Auth(AuthError::TokenError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        } else if let ApiError::Auth(e) = &self {
            warn!(code = e.code(), error = %msg, "auth failure");
        }
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}
