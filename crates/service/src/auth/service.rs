use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::UserRepository;
use super::token;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user with a hashed password. The raw password is
    /// neither stored nor logged.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<(), AuthError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("username and password required".into()));
        }
        if let Some(existing) = self.repo.find_by_username(&input.username).await? {
            debug!("user exists: {}", existing.username);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        self.repo.create_user(&input.username, hash).await?;
        info!(username = %input.username, "user_registered");
        Ok(())
    }

    /// Authenticate a user and issue a session token. Unknown usernames and
    /// wrong passwords surface the same `Unauthorized` error.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed =
            PasswordHash::new(&user.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AuthError::Unauthorized);
        }

        let token = token::issue(&user.username, &self.cfg.jwt_secret, self.cfg.token_ttl_secs)?;
        Ok(AuthSession {
            username: user.username,
            token,
        })
    }
}
