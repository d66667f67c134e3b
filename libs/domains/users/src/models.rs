use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_NAME: &str = "USER";
pub const DEFAULT_LOGIN: &str = "user";
pub const DEFAULT_PASSWORD: &str = "P@55w0rd";

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique among live users
    pub login: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// 1 on creation, incremented by every update
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as returned by the API; never carries the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub login: String,
    pub version: u32,
    /// Epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
    /// Epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            login: user.login,
            version: user.version,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub login: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
}

/// DTO for updating an existing user; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub login: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
}

/// DTO for `PUT /users/{id}/password`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    #[validate(length(min = 1, max = 128))]
    pub old_password: String,
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

impl User {
    /// Create a new user (password is hashed by the service layer)
    pub fn new(name: String, login: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            login,
            password_hash,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates (password must already be hashed) and bump the version
    pub fn apply_update(&mut self, update: UpdateUser, new_password_hash: Option<String>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(login) = update.login {
            self.login = login;
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}
