use axum::Router;
use domain_boards::{BoardService, TaskService};
use domain_music::MusicServices;
use domain_users::UserService;

use crate::state::Repositories;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `create_router`.
///
/// Every sub-router has its state applied, so the result is stateless.
pub fn routes(repos: &Repositories) -> Router {
    let users = UserService::new(repos.users.clone(), repos.tasks.clone());
    let boards = BoardService::new(
        repos.boards.clone(),
        repos.tasks.clone(),
        repos.board_lock.clone(),
    );
    let tasks = TaskService::new(
        repos.tasks.clone(),
        repos.boards.clone(),
        repos.board_lock.clone(),
    );
    let music = MusicServices::new(
        repos.artists.clone(),
        repos.albums.clone(),
        repos.tracks.clone(),
        repos.favorites.clone(),
    );

    Router::new()
        .nest("/users", domain_users::handlers::router(users))
        .nest("/boards", domain_boards::handlers::router(boards, tasks))
        .merge(domain_music::handlers::router(music))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::{create_cors_layer, create_router};
    use serde_json::{Value, json};
    use test_utils::http::{empty_request, json_request, read_json};
    use tower::ServiceExt;

    fn app() -> Router {
        let cors = create_cors_layer(None, true).unwrap();
        create_router::<crate::openapi::ApiDoc>(routes(&Repositories::new()), cors)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => json_request(method, uri, &body),
            None => empty_request(method, uri),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = if status == StatusCode::NO_CONTENT {
            Value::Null
        } else {
            read_json(response).await
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_user_delete_unassigns_tasks_across_domains() {
        let app = app();

        let (status, user) = call(&app, "POST", "/api/users", Some(json!({ "login": "owner" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, board) = call(&app, "POST", "/api/boards", Some(json!({ "title": "Board" }))).await;

        let tasks_uri = format!("/api/boards/{}/tasks", board["id"].as_str().unwrap());
        let (status, task) = call(
            &app,
            "POST",
            &tasks_uri,
            Some(json!({ "title": "Task", "userId": user["id"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["userId"], user["id"]);

        let user_uri = format!("/api/users/{}", user["id"].as_str().unwrap());
        let (status, _) = call(&app, "DELETE", &user_uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let task_uri = format!("{}/{}", tasks_uri, task["id"].as_str().unwrap());
        let (status, task) = call(&app, "GET", &task_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(task["userId"].is_null());
    }

    #[tokio::test]
    async fn test_music_routes_sit_at_api_root() {
        let app = app();

        let (status, favorites) = call(&app, "GET", "/api/favs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(favorites, json!({ "artists": [], "albums": [], "tracks": [] }));

        let (status, body) = call(&app, "GET", "/api/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
