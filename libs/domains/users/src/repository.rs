use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in insertion order
    async fn get_all(&self) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn get_by_login(&self, login: &str) -> UserResult<Option<User>>;

    /// Store a new user; fails with `DuplicateLogin` if the login is taken
    async fn create(&self, user: User) -> UserResult<User>;

    /// Replace the stored user with the same id.
    ///
    /// `user.version` must be exactly one past the stored version, otherwise
    /// the write fails with `StaleVersion`.
    async fn update(&self, user: User) -> UserResult<User>;

    /// Returns false if no user had this id
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository.
///
/// Clones share the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> UserResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_login(&self, login: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.login == login).cloned())
    }

    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Checked under the write lock so concurrent creates cannot both pass
        if users.iter().any(|u| u.login == user.login) {
            return Err(UserError::DuplicateLogin(user.login));
        }

        users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.id != user.id && u.login == user.login) {
            return Err(UserError::DuplicateLogin(user.login));
        }

        let index = users
            .iter()
            .position(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id))?;

        let current = users[index].version;
        if current.checked_add(1) != Some(user.version) {
            tracing::warn!(
                user_id = %user.id,
                current,
                attempted = user.version,
                "Rejected stale user update"
            );
            return Err(UserError::StaleVersion {
                id: user.id,
                current,
            });
        }

        users[index] = user.clone();

        tracing::info!(user_id = %user.id, version = user.version, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.iter().position(|u| u.id == id) {
            Some(index) => {
                users.remove(index);
                tracing::info!(user_id = %id, "Deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
