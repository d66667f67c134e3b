use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use domain_boards::TaskRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{ChangePassword, CreateUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "Users";

type UserState<U, T> = State<Arc<UserService<U, T>>>;

/// OpenAPI documentation for Users API (mounted under `/users`)
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        change_password,
        delete_user,
    ),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, ChangePassword),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the user router, relative to the `/users` mount point
pub fn router<U, T>(service: UserService<U, T>) -> Router
where
    U: UserRepository + 'static,
    T: TaskRepository + 'static,
{
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/password", put(change_password))
        .with_state(Arc::new(service))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<U: UserRepository, T: TaskRepository>(
    State(service): UserState<U, T>,
) -> UserResult<Json<Vec<UserResponse>>> {
    Ok(Json(service.list_users().await?))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<U: UserRepository, T: TaskRepository>(
    State(service): UserState<U, T>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    AuditEvent::new("user.create", AuditOutcome::Success)
        .with_resource("user", user.id)
        .with_request_headers(&headers)
        .with_details(json!({ "login": user.login }))
        .log();

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<U: UserRepository, T: TaskRepository>(
    State(service): UserState<U, T>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.get_user(&id).await?))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<U: UserRepository, T: TaskRepository>(
    State(service): UserState<U, T>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.update_user(&id, input).await?))
}

/// Change a user's password
#[utoipa::path(
    put,
    path = "/{id}/password",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = ChangePassword,
    responses(
        (status = 200, description = "Password changed", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn change_password<U: UserRepository, T: TaskRepository>(
    State(service): UserState<U, T>,
    headers: HeaderMap,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ChangePassword>,
) -> UserResult<Json<UserResponse>> {
    let result = service.change_password(&id, input).await;

    let outcome = match &result {
        Ok(_) => AuditOutcome::Success,
        Err(UserError::WrongPassword) => AuditOutcome::Denied,
        Err(_) => AuditOutcome::Failure,
    };
    AuditEvent::new("user.password_change", outcome)
        .with_resource("user", &id)
        .with_request_headers(&headers)
        .log();

    Ok(Json(result?))
}

/// Delete a user; their tasks become unassigned
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<U: UserRepository, T: TaskRepository>(
    State(service): UserState<U, T>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> UserResult<impl IntoResponse> {
    let unassigned = service.delete_user(&id).await?;

    AuditEvent::new("user.delete", AuditOutcome::Success)
        .with_resource("user", &id)
        .with_request_headers(&headers)
        .with_details(json!({ "tasks_unassigned": unassigned }))
        .log();

    Ok(StatusCode::NO_CONTENT)
}
