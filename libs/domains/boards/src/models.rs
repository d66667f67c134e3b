use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_BOARD_TITLE: &str = "Board title";
pub const DEFAULT_COLUMN_TITLE: &str = "Column title";
pub const DEFAULT_TASK_TITLE: &str = "Task title";

/// Supplied column ids must be distinct within one board
fn unique_column_ids(columns: &[CreateColumn]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if columns.iter().filter_map(|c| c.id).all(|id| seen.insert(id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_column_id"))
    }
}

/// Column on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    pub order: u32,
}

/// Board entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub columns: Vec<Column>,
}

/// Task entity. Always belongs to the board it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub order: u32,
    pub description: String,
    pub user_id: Option<Uuid>,
    pub board_id: Option<Uuid>,
    pub column_id: Option<Uuid>,
}

/// Column as supplied in board payloads; a missing id is generated
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateColumn {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub order: Option<u32>,
}

/// DTO for creating a new board
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBoard {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(nested, custom(function = "unique_column_ids"))]
    pub columns: Option<Vec<CreateColumn>>,
}

/// DTO for updating a board; `columns` replaces the whole list
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBoard {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(nested, custom(function = "unique_column_ids"))]
    pub columns: Option<Vec<CreateColumn>>,
}

/// DTO for creating a task. `boardId` in the body is ignored; the path wins.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub order: Option<u32>,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
    pub board_id: Option<Uuid>,
    pub column_id: Option<Uuid>,
}

/// DTO for updating a task. `null` clears `userId`/`columnId`, absence keeps them.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub order: Option<u32>,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    #[serde(default, with = "axum_helpers::nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub user_id: Option<Option<Uuid>>,
    #[serde(default, with = "axum_helpers::nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub column_id: Option<Option<Uuid>>,
}

impl Column {
    pub fn new(input: CreateColumn) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            title: input
                .title
                .unwrap_or_else(|| DEFAULT_COLUMN_TITLE.to_string()),
            order: input.order.unwrap_or(0),
        }
    }
}

impl Board {
    pub fn new(input: CreateBoard) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title.unwrap_or_else(|| DEFAULT_BOARD_TITLE.to_string()),
            columns: input
                .columns
                .unwrap_or_default()
                .into_iter()
                .map(Column::new)
                .collect(),
        }
    }

    pub fn apply_update(&mut self, update: UpdateBoard) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(columns) = update.columns {
            self.columns = columns.into_iter().map(Column::new).collect();
        }
    }
}

impl Task {
    /// Builds a task on `board_id`, whatever the payload says.
    pub fn new(board_id: Uuid, input: CreateTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title.unwrap_or_else(|| DEFAULT_TASK_TITLE.to_string()),
            order: input.order.unwrap_or(0),
            description: input.description.unwrap_or_default(),
            user_id: input.user_id,
            board_id: Some(board_id),
            column_id: input.column_id,
        }
    }

    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(order) = update.order {
            self.order = order;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(user_id) = update.user_id {
            self.user_id = user_id;
        }
        if let Some(column_id) = update.column_id {
            self.column_id = column_id;
        }
    }
}
