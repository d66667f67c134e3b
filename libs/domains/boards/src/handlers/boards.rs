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
use serde_json::json;
use std::sync::Arc;

use super::BOARDS_TAG;
use crate::error::BoardResult;
use crate::models::{Board, CreateBoard, UpdateBoard};
use crate::repository::{BoardRepository, TaskRepository};
use crate::service::BoardService;

type BoardState<B, T> = State<Arc<BoardService<B, T>>>;

/// List all boards
#[utoipa::path(
    get,
    path = "",
    tag = BOARDS_TAG,
    responses(
        (status = 200, description = "List of boards", body = Vec<Board>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_boards<B: BoardRepository, T: TaskRepository>(
    State(service): BoardState<B, T>,
) -> BoardResult<Json<Vec<Board>>> {
    Ok(Json(service.list_boards().await?))
}

/// Create a new board
#[utoipa::path(
    post,
    path = "",
    tag = BOARDS_TAG,
    request_body = CreateBoard,
    responses(
        (status = 201, description = "Board created successfully", body = Board),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_board<B: BoardRepository, T: TaskRepository>(
    State(service): BoardState<B, T>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateBoard>,
) -> BoardResult<impl IntoResponse> {
    let board = service.create_board(input).await?;

    AuditEvent::new("board.create", AuditOutcome::Success)
        .with_resource("board", board.id)
        .with_request_headers(&headers)
        .with_details(json!({ "title": board.title, "columns": board.columns.len() }))
        .log();

    Ok((StatusCode::CREATED, Json(board)))
}

/// Get a board by ID
#[utoipa::path(
    get,
    path = "/{boardId}",
    tag = BOARDS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID")
    ),
    responses(
        (status = 200, description = "Board found", body = Board),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_board<B: BoardRepository, T: TaskRepository>(
    State(service): BoardState<B, T>,
    Path(board_id): Path<String>,
) -> BoardResult<Json<Board>> {
    Ok(Json(service.get_board(&board_id).await?))
}

/// Update a board
#[utoipa::path(
    put,
    path = "/{boardId}",
    tag = BOARDS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID")
    ),
    request_body = UpdateBoard,
    responses(
        (status = 200, description = "Board updated successfully", body = Board),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_board<B: BoardRepository, T: TaskRepository>(
    State(service): BoardState<B, T>,
    Path(board_id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateBoard>,
) -> BoardResult<Json<Board>> {
    Ok(Json(service.update_board(&board_id, input).await?))
}

/// Delete a board and every task on it
#[utoipa::path(
    delete,
    path = "/{boardId}",
    tag = BOARDS_TAG,
    params(
        ("boardId" = String, Path, description = "Board ID")
    ),
    responses(
        (status = 204, description = "Board and its tasks deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_board<B: BoardRepository, T: TaskRepository>(
    State(service): BoardState<B, T>,
    headers: HeaderMap,
    Path(board_id): Path<String>,
) -> BoardResult<impl IntoResponse> {
    let removed_tasks = service.delete_board(&board_id).await?;

    AuditEvent::new("board.delete", AuditOutcome::Success)
        .with_resource("board", &board_id)
        .with_request_headers(&headers)
        .with_details(json!({ "tasks_removed": removed_tasks }))
        .log();

    Ok(StatusCode::NO_CONTENT)
}
