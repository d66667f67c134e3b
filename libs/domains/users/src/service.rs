use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use domain_boards::TaskRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult, parse_id};
use crate::models::{
    ChangePassword, CreateUser, DEFAULT_LOGIN, DEFAULT_NAME, DEFAULT_PASSWORD, UpdateUser, User,
    UserResponse,
};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<U: UserRepository, T: TaskRepository> {
    repository: Arc<U>,
    tasks: Arc<T>,
}

impl<U: UserRepository, T: TaskRepository> UserService<U, T> {
    pub fn new(repository: U, tasks: T) -> Self {
        Self {
            repository: Arc::new(repository),
            tasks: Arc::new(tasks),
        }
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.get_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<UserResponse> {
        let id = parse_id("id", id)?;
        Ok(self.find_user(id).await?.into())
    }

    /// Create a new user; the login must not belong to a live user
    #[instrument(skip(self, input), fields(login = ?input.login))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        validate(&input)?;

        let login = input.login.unwrap_or_else(|| DEFAULT_LOGIN.to_string());
        if self.repository.get_by_login(&login).await?.is_some() {
            return Err(UserError::DuplicateLogin(login));
        }

        let password = input.password.as_deref().unwrap_or(DEFAULT_PASSWORD);
        let user = User::new(
            input.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            login,
            hash_password(password)?,
        );

        Ok(self.repository.create(user).await?.into())
    }

    /// Partial update; a new login must not collide with another user
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: &str, input: UpdateUser) -> UserResult<UserResponse> {
        let id = parse_id("id", id)?;
        validate(&input)?;

        let mut user = self.find_user(id).await?;

        if let Some(login) = &input.login {
            if let Some(owner) = self.repository.get_by_login(login).await? {
                if owner.id != id {
                    return Err(UserError::DuplicateLogin(login.clone()));
                }
            }
        }

        let new_password_hash = input.password.as_deref().map(hash_password).transpose()?;
        user.apply_update(input, new_password_hash);

        Ok(self.repository.update(user).await?.into())
    }

    /// Replace the password after checking the old one
    #[instrument(skip(self, input))]
    pub async fn change_password(
        &self,
        id: &str,
        input: ChangePassword,
    ) -> UserResult<UserResponse> {
        let id = parse_id("id", id)?;
        validate(&input)?;

        let mut user = self.find_user(id).await?;

        if !verify_password(&input.old_password, &user.password_hash)? {
            tracing::warn!(user_id = %id, "Password change rejected: old password mismatch");
            return Err(UserError::WrongPassword);
        }

        user.password_hash = hash_password(&input.new_password)?;
        user.touch();

        Ok(self.repository.update(user).await?.into())
    }

    /// Delete a user and unassign their tasks.
    ///
    /// Returns the number of tasks that lost their owner.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<usize> {
        let id = parse_id("id", id)?;

        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(self.tasks.on_user_deleted(id).await?)
    }

    async fn find_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

fn validate<V: Validate>(input: &V) -> UserResult<()> {
    input
        .validate()
        .map_err(|e| UserError::Validation(e.to_string()))
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
