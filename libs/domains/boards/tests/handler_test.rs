//! Handler tests for Boards domain
//!
//! These drive the boards router directly: request deserialization, status
//! codes, error bodies and the board → task cascade as seen over HTTP.

use axum::Router;
use axum::http::StatusCode;
use domain_boards::*;
use serde_json::{Value, json};
use test_utils::assertions::assert_error_body;
use test_utils::http::{empty_request, json_request, raw_json_request, read_json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app_with_tasks() -> (Router, InMemoryTaskRepository) {
    let boards = InMemoryBoardRepository::new();
    let tasks = InMemoryTaskRepository::new();
    let lock = BoardLock::new();
    let router = handlers::router(
        BoardService::new(boards.clone(), tasks.clone(), lock.clone()),
        TaskService::new(tasks.clone(), boards, lock),
    );
    (router, tasks)
}

fn app() -> Router {
    app_with_tasks().0
}

async fn create_board(app: &Router, title: &str) -> Board {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &json!({ "title": title, "columns": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

async fn create_task(app: &Router, board_id: uuid::Uuid, body: Value) -> Task {
    let response = app
        .clone()
        .oneshot(json_request("POST", &format!("/{}/tasks", board_id), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn test_create_board_handler_returns_201() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_create_board");

    let board = create_board(&app, &builder.name("board", "main")).await;

    assert_eq!(board.title, builder.name("board", "main"));
    assert!(board.columns.is_empty());
}

#[tokio::test]
async fn test_create_board_generates_column_ids() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            &json!({ "title": "Kanban", "columns": [{ "title": "Todo", "order": 1 }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = read_json(response).await;
    assert!(uuid::Uuid::parse_str(body["columns"][0]["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["columns"][0]["title"], "Todo");
    assert_eq!(body["columns"][0]["order"], 1);
}

#[tokio::test]
async fn test_create_board_with_empty_title_is_400() {
    let response = app()
        .oneshot(json_request("POST", "/", &json!({ "title": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_error_body(&body, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_board_with_repeated_column_id_is_400() {
    let app = app();
    let column_id = uuid::Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            &json!({
                "title": "Kanban",
                "columns": [
                    { "id": column_id, "title": "Todo" },
                    { "id": column_id, "title": "Done" }
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_error_body(&body, "VALIDATION_ERROR");

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let boards: Vec<Board> = read_json(response).await;
    assert!(boards.is_empty());
}

#[tokio::test]
async fn test_update_board_with_repeated_column_id_is_400() {
    let app = app();
    let board = create_board(&app, "Kanban").await;
    let column_id = uuid::Uuid::new_v4();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", board.id),
            &json!({ "columns": [{ "id": column_id }, { "id": column_id }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let response = app()
        .oneshot(raw_json_request("POST", "/", "{\"title\":"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_board_with_invalid_id_is_400() {
    let response = app()
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_error_body(&body, "INVALID_UUID");
}

#[tokio::test]
async fn test_get_board_with_unhyphenated_id_is_400() {
    let app = app();
    let board = create_board(&app, "Kanban").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", board.id.simple())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_error_body(&body, "INVALID_UUID");
}

#[tokio::test]
async fn test_get_unknown_board_is_404() {
    let builder = TestDataBuilder::from_test_name("handler_unknown_board");

    let response = app()
        .oneshot(empty_request("GET", &format!("/{}", builder.id(1))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = read_json(response).await;
    assert_error_body(&body, "NOT_FOUND");
}

#[tokio::test]
async fn test_update_board_changes_title_only() {
    let app = app();
    let board = create_board(&app, "Before").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", board.id),
            &json!({ "title": "After" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Board = read_json(response).await;
    assert_eq!(updated.id, board.id);
    assert_eq!(updated.title, "After");
    assert_eq!(updated.columns, board.columns);
}

#[tokio::test]
async fn test_task_lifecycle_under_board() {
    let app = app();
    let board = create_board(&app, "Sprint 1").await;

    let task = create_task(
        &app,
        board.id,
        json!({ "title": "Fix bug", "order": 1, "description": "crash on start" }),
    )
    .await;
    assert_eq!(task.board_id, Some(board.id));

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}/tasks", board.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Task> = read_json(response).await;
    assert_eq!(listed, vec![task.clone()]);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}/tasks/{}", board.id, task.id),
            &json!({ "order": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Task = read_json(response).await;
    assert_eq!(updated.order, 5);
    assert_eq!(updated.title, "Fix bug");

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/{}/tasks/{}", board.id, task.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/{}/tasks/{}", board.id, task.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_body_board_id_is_ignored() {
    let app = app();
    let board = create_board(&app, "Real").await;
    let builder = TestDataBuilder::from_test_name("handler_body_board_id");

    let task = create_task(&app, board.id, json!({ "boardId": builder.id(9) })).await;

    assert_eq!(task.board_id, Some(board.id));
    assert_eq!(task.title, "Task title");
}

#[tokio::test]
async fn test_task_with_invalid_task_id_is_400() {
    let app = app();
    let board = create_board(&app, "Sprint").await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}/tasks/123", board.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_board_cascades_to_tasks() {
    let (app, tasks) = app_with_tasks();
    let board = create_board(&app, "Sprint 1").await;
    let other = create_board(&app, "Sprint 2").await;
    create_task(&app, board.id, json!({ "title": "Fix bug" })).await;
    create_task(&app, board.id, json!({ "title": "Ship it" })).await;
    let survivor = create_task(&app, other.id, json!({ "title": "Keep me" })).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/{}", board.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", board.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(tasks.get_all().await.unwrap(), vec![survivor]);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}/tasks", board.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/{}", board.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
