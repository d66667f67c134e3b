use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::EntityKind;

#[derive(Debug, Error)]
pub enum MusicError {
    #[error("Invalid {field}: '{value}' is not a valid UUID")]
    InvalidId { field: &'static str, value: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    /// Adding a favorite that refers to a missing record
    #[error("{kind} {id} does not exist")]
    Unprocessable { kind: EntityKind, id: Uuid },

    #[error("{kind} {id} is not in favorites")]
    NotFavorite { kind: EntityKind, id: Uuid },

    #[error("{0}")]
    UnknownKind(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type MusicResult<T> = Result<T, MusicError>;

impl From<MusicError> for AppError {
    fn from(err: MusicError) -> Self {
        match err {
            MusicError::InvalidId { .. } => AppError::InvalidId(err.to_string()),
            MusicError::NotFound { .. }
            | MusicError::NotFavorite { .. }
            | MusicError::UnknownKind(_) => {
                AppError::NotFound(err.to_string())
            }
            MusicError::Unprocessable { .. } => AppError::UnprocessableEntity(err.to_string()),
            MusicError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for MusicError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Accepts only the canonical hyphenated form.
pub(crate) fn parse_id(field: &'static str, value: &str) -> MusicResult<Uuid> {
    Some(value)
        .filter(|v| v.len() == uuid::fmt::Hyphenated::LENGTH)
        .and_then(|v| Uuid::try_parse(v).ok())
        .ok_or_else(|| MusicError::InvalidId {
            field,
            value: value.to_string(),
        })
}
