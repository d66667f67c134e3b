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

use super::ALBUMS_TAG;
use crate::error::MusicResult;
use crate::models::{Album, CreateAlbum, UpdateAlbum};
use crate::repository::{AlbumRepository, FavoritesRepository, TrackRepository};
use crate::service::AlbumService;

type AlbumState<L, T, F> = State<Arc<AlbumService<L, T, F>>>;

/// List all albums
#[utoipa::path(
    get,
    path = "/album",
    tag = ALBUMS_TAG,
    responses(
        (status = 200, description = "List of albums", body = Vec<Album>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_albums<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository>(
    State(service): AlbumState<L, T, F>,
) -> MusicResult<Json<Vec<Album>>> {
    Ok(Json(service.list_albums().await?))
}

/// Create an album
#[utoipa::path(
    post,
    path = "/album",
    tag = ALBUMS_TAG,
    request_body = CreateAlbum,
    responses(
        (status = 201, description = "Album created", body = Album),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_album<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository>(
    State(service): AlbumState<L, T, F>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateAlbum>,
) -> MusicResult<impl IntoResponse> {
    let album = service.create_album(input).await?;

    AuditEvent::new("album.create", AuditOutcome::Success)
        .with_resource("album", album.id)
        .with_request_headers(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(album)))
}

#[utoipa::path(
    get,
    path = "/album/{id}",
    tag = ALBUMS_TAG,
    params(("id" = String, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Album found", body = Album),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn get_album<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository>(
    State(service): AlbumState<L, T, F>,
    Path(id): Path<String>,
) -> MusicResult<Json<Album>> {
    Ok(Json(service.get_album(&id).await?))
}

#[utoipa::path(
    put,
    path = "/album/{id}",
    tag = ALBUMS_TAG,
    params(("id" = String, Path, description = "Album ID")),
    request_body = UpdateAlbum,
    responses(
        (status = 200, description = "Album updated", body = Album),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn update_album<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository>(
    State(service): AlbumState<L, T, F>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateAlbum>,
) -> MusicResult<Json<Album>> {
    Ok(Json(service.update_album(&id, input).await?))
}

/// Delete an album. Its tracks stay, without the album link.
#[utoipa::path(
    delete,
    path = "/album/{id}",
    tag = ALBUMS_TAG,
    params(("id" = String, Path, description = "Album ID")),
    responses(
        (status = 204, description = "Album deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn delete_album<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository>(
    State(service): AlbumState<L, T, F>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> MusicResult<impl IntoResponse> {
    let unlinked = service.delete_album(&id).await?;

    AuditEvent::new("album.delete", AuditOutcome::Success)
        .with_resource("album", &id)
        .with_request_headers(&headers)
        .with_details(json!({ "unlinked": unlinked }))
        .log();

    Ok(StatusCode::NO_CONTENT)
}
