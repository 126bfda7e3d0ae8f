use async_trait::async_trait;

use super::domain::User;
use super::errors::AuthError;

/// Repository abstraction over the registered-user list. Handlers receive an
/// implementation through shared state rather than touching module globals.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;
    async fn create_user(&self, username: &str, password_hash: String) -> Result<User, AuthError>;
}

/// In-memory user list. This is the production store: users live for the
/// process lifetime only and vanish on restart.
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryUserRepository {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MemoryUserRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.username == username).cloned())
        }

        async fn create_user(
            &self,
            username: &str,
            password_hash: String,
        ) -> Result<User, AuthError> {
            let mut users = self.users.lock().unwrap();
            // duplicate check and insert under the same lock
            if users.iter().any(|u| u.username == username) {
                return Err(AuthError::Conflict);
            }
            let user = User {
                username: username.to_string(),
                password_hash,
            };
            users.push(user.clone());
            Ok(user)
        }
    }
}
