mod boards;
mod tasks;

use axum::{Router, routing::get};
use axum_helpers::errors::responses::{
    BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    Board, Column, CreateBoard, CreateColumn, CreateTask, Task, UpdateBoard, UpdateTask,
};
use crate::repository::{BoardRepository, TaskRepository};
use crate::service::{BoardService, TaskService};

pub const BOARDS_TAG: &str = "Boards";
pub const TASKS_TAG: &str = "Tasks";

/// OpenAPI documentation for Boards API (mounted under `/boards`)
#[derive(OpenApi)]
#[openapi(
    paths(
        boards::list_boards,
        boards::create_board,
        boards::get_board,
        boards::update_board,
        boards::delete_board,
        tasks::list_tasks,
        tasks::create_task,
        tasks::get_task,
        tasks::update_task,
        tasks::delete_task,
    ),
    components(
        schemas(Board, Column, CreateBoard, CreateColumn, UpdateBoard, Task, CreateTask, UpdateTask),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = BOARDS_TAG, description = "Board management endpoints"),
        (name = TASKS_TAG, description = "Tasks nested under a board")
    )
)]
pub struct ApiDoc;

/// Board and task routes, relative to the `/boards` mount point
pub fn router<B, T>(board_service: BoardService<B, T>, task_service: TaskService<T, B>) -> Router
where
    B: BoardRepository + 'static,
    T: TaskRepository + 'static,
{
    let boards = Router::new()
        .route("/", get(boards::list_boards).post(boards::create_board))
        .route(
            "/{boardId}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .with_state(Arc::new(board_service));

    let tasks = Router::new()
        .route(
            "/{boardId}/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/{boardId}/tasks/{taskId}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .with_state(Arc::new(task_service));

    boards.merge(tasks)
}
