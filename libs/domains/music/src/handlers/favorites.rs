use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_helpers::{
    AuditEvent, AuditOutcome,
    errors::responses::{
        BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
        UnprocessableEntityResponse,
    },
};
use std::sync::Arc;

use super::FAVORITES_TAG;
use crate::error::{MusicError, MusicResult};
use crate::models::{EntityKind, FavoritesResponse};
use crate::repository::{
    AlbumRepository, ArtistRepository, FavoritesRepository, TrackRepository,
};
use crate::service::FavoritesService;

type FavoritesState<A, L, T, F> = State<Arc<FavoritesService<A, L, T, F>>>;

fn parse_kind(kind: &str) -> MusicResult<EntityKind> {
    kind.parse().map_err(MusicError::UnknownKind)
}

/// List favorite artists, albums and tracks
#[utoipa::path(
    get,
    path = "/favs",
    tag = FAVORITES_TAG,
    responses(
        (status = 200, description = "Favorite records", body = FavoritesResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_favorites<A, L, T, F>(
    State(service): FavoritesState<A, L, T, F>,
) -> MusicResult<Json<FavoritesResponse>>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    Ok(Json(service.get_favorites().await?))
}

/// Add an existing record to favorites
#[utoipa::path(
    post,
    path = "/favs/{kind}/{id}",
    tag = FAVORITES_TAG,
    params(
        ("kind" = EntityKind, Path, description = "artist, album or track"),
        ("id" = String, Path, description = "Record ID")
    ),
    responses(
        (status = 201, description = "Added to favorites"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse)
    )
)]
pub async fn add_favorite<A, L, T, F>(
    State(service): FavoritesState<A, L, T, F>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, String)>,
) -> MusicResult<impl IntoResponse>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    let kind = parse_kind(&kind)?;
    let id = service.add_favorite(kind, &id).await?;

    AuditEvent::new("favorite.add", AuditOutcome::Success)
        .with_resource(kind.as_str(), id)
        .with_request_headers(&headers)
        .log();

    Ok(StatusCode::CREATED)
}

/// Remove a record from favorites
#[utoipa::path(
    delete,
    path = "/favs/{kind}/{id}",
    tag = FAVORITES_TAG,
    params(
        ("kind" = EntityKind, Path, description = "artist, album or track"),
        ("id" = String, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn remove_favorite<A, L, T, F>(
    State(service): FavoritesState<A, L, T, F>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, String)>,
) -> MusicResult<impl IntoResponse>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    let kind = parse_kind(&kind)?;
    service.remove_favorite(kind, &id).await?;

    AuditEvent::new("favorite.remove", AuditOutcome::Success)
        .with_resource(kind.as_str(), &id)
        .with_request_headers(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
