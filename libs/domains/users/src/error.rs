use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_boards::BoardError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid {field}: '{value}' is not a valid UUID")]
    InvalidId { field: &'static str, value: String },

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with login '{0}' already exists")]
    DuplicateLogin(String),

    #[error("Old password is wrong")]
    WrongPassword,

    #[error("User {id} was modified concurrently (stored version {current})")]
    StaleVersion { id: Uuid, current: u32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Task cascade failures surface as internal errors of the user operation
impl From<BoardError> for UserError {
    fn from(err: BoardError) -> Self {
        UserError::Internal(err.to_string())
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidId { .. } => AppError::InvalidId(err.to_string()),
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::DuplicateLogin(_) | UserError::StaleVersion { .. } => {
                AppError::Conflict(err.to_string())
            }
            UserError::WrongPassword => AppError::Forbidden(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Accepts only the canonical hyphenated form.
pub(crate) fn parse_id(field: &'static str, value: &str) -> UserResult<Uuid> {
    Some(value)
        .filter(|v| v.len() == uuid::fmt::Hyphenated::LENGTH)
        .and_then(|v| Uuid::try_parse(v).ok())
        .ok_or_else(|| UserError::InvalidId {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (UserError::DuplicateLogin("neo".into()), StatusCode::CONFLICT),
            (UserError::WrongPassword, StatusCode::FORBIDDEN),
            (
                UserError::StaleVersion {
                    id: Uuid::nil(),
                    current: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                UserError::InvalidId {
                    field: "id",
                    value: "x".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::PasswordHash("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_board_errors_become_internal() {
        let err: UserError = BoardError::BoardNotFound(Uuid::nil()).into();
        assert!(matches!(err, UserError::Internal(_)));
        assert_eq!(
            AppError::from(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_parse_id_rejects_non_canonical_forms() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("id", &id.to_string()).unwrap(), id);
        assert!(parse_id("id", &id.simple().to_string()).is_err());
        assert!(parse_id("id", &id.braced().to_string()).is_err());
        assert!(parse_id("id", &id.urn().to_string()).is_err());
    }
}
