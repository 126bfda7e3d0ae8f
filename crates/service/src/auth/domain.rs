use serde::{Deserialize, Serialize};

/// Registration input. Fields default to empty so absent JSON keys fail
/// validation instead of deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registered user. Only the hash is kept; the raw password never is.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub username: String,
    pub token: String,
}
