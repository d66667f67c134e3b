use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;

use super::TASKS_TAG;
use crate::error::BoardResult;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::{BoardRepository, TaskRepository};
use crate::service::TaskService;

type TaskState<T, B> = State<Arc<TaskService<T, B>>>;

/// List the tasks of a board
#[utoipa::path(
    get,
    path = "/{boardId}/tasks",
    tag = TASKS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID")
    ),
    responses(
        (status = 200, description = "Tasks on the board", body = Vec<Task>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tasks<T: TaskRepository, B: BoardRepository>(
    State(service): TaskState<T, B>,
    Path(board_id): Path<String>,
) -> BoardResult<Json<Vec<Task>>> {
    Ok(Json(service.list_tasks(&board_id).await?))
}

/// Create a task on a board
#[utoipa::path(
    post,
    path = "/{boardId}/tasks",
    tag = TASKS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID")
    ),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_task<T: TaskRepository, B: BoardRepository>(
    State(service): TaskState<T, B>,
    headers: HeaderMap,
    Path(board_id): Path<String>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> BoardResult<impl IntoResponse> {
    let task = service.create_task(&board_id, input).await?;

    AuditEvent::new("task.create", AuditOutcome::Success)
        .with_resource("task", task.id)
        .with_request_headers(&headers)
        .with_details(serde_json::json!({ "board_id": board_id }))
        .log();

    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task of a board
#[utoipa::path(
    get,
    path = "/{boardId}/tasks/{taskId}",
    tag = TASKS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID"),
        ("taskId" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_task<T: TaskRepository, B: BoardRepository>(
    State(service): TaskState<T, B>,
    Path((board_id, task_id)): Path<(String, String)>,
) -> BoardResult<Json<Task>> {
    Ok(Json(service.get_task(&board_id, &task_id).await?))
}

/// Update a task of a board
#[utoipa::path(
    put,
    path = "/{boardId}/tasks/{taskId}",
    tag = TASKS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID"),
        ("taskId" = String, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_task<T: TaskRepository, B: BoardRepository>(
    State(service): TaskState<T, B>,
    Path((board_id, task_id)): Path<(String, String)>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> BoardResult<Json<Task>> {
    Ok(Json(service.update_task(&board_id, &task_id, input).await?))
}

/// Delete a task of a board
#[utoipa::path(
    delete,
    path = "/{boardId}/tasks/{taskId}",
    tag = TASKS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID"),
        ("taskId" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_task<T: TaskRepository, B: BoardRepository>(
    State(service): TaskState<T, B>,
    headers: HeaderMap,
    Path((board_id, task_id)): Path<(String, String)>,
) -> BoardResult<impl IntoResponse> {
    service.delete_task(&board_id, &task_id).await?;

    AuditEvent::new("task.delete", AuditOutcome::Success)
        .with_resource("task", &task_id)
        .with_request_headers(&headers)
        .with_details(serde_json::json!({ "board_id": board_id }))
        .log();

    Ok(StatusCode::NO_CONTENT)
}
