use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid {field}: '{value}' is not a valid UUID")]
    InvalidId { field: &'static str, value: String },

    #[error("Board not found: {0}")]
    BoardNotFound(Uuid),

    #[error("Task {task_id} not found on board {board_id}")]
    TaskNotFound { board_id: Uuid, task_id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Convert BoardError to AppError for standardized error responses
impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidId { .. } => AppError::InvalidId(err.to_string()),
            BoardError::BoardNotFound(id) => AppError::NotFound(format!("Board {} not found", id)),
            BoardError::TaskNotFound { board_id, task_id } => AppError::NotFound(format!(
                "Task {} not found on board {}",
                task_id, board_id
            )),
            BoardError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Parses an id received as text, naming the offending field on failure.
///
/// Only the canonical hyphenated form is accepted.
pub(crate) fn parse_id(field: &'static str, value: &str) -> BoardResult<Uuid> {
    Some(value)
        .filter(|v| v.len() == uuid::fmt::Hyphenated::LENGTH)
        .and_then(|v| Uuid::try_parse(v).ok())
        .ok_or_else(|| BoardError::InvalidId {
            field,
            value: value.to_string(),
        })
}
