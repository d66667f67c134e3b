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

use super::ARTISTS_TAG;
use crate::error::MusicResult;
use crate::models::{Artist, CreateArtist, UpdateArtist};
use crate::repository::{
    AlbumRepository, ArtistRepository, FavoritesRepository, TrackRepository,
};
use crate::service::ArtistService;

type ArtistState<A, L, T, F> = State<Arc<ArtistService<A, L, T, F>>>;

/// List all artists
#[utoipa::path(
    get,
    path = "/artist",
    tag = ARTISTS_TAG,
    responses(
        (status = 200, description = "List of artists", body = Vec<Artist>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_artists<A, L, T, F>(
    State(service): ArtistState<A, L, T, F>,
) -> MusicResult<Json<Vec<Artist>>>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    Ok(Json(service.list_artists().await?))
}

/// Create an artist
#[utoipa::path(
    post,
    path = "/artist",
    tag = ARTISTS_TAG,
    request_body = CreateArtist,
    responses(
        (status = 201, description = "Artist created", body = Artist),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_artist<A, L, T, F>(
    State(service): ArtistState<A, L, T, F>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateArtist>,
) -> MusicResult<impl IntoResponse>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    let artist = service.create_artist(input).await?;

    AuditEvent::new("artist.create", AuditOutcome::Success)
        .with_resource("artist", artist.id)
        .with_request_headers(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(artist)))
}

#[utoipa::path(
    get,
    path = "/artist/{id}",
    tag = ARTISTS_TAG,
    params(("id" = String, Path, description = "Artist ID")),
    responses(
        (status = 200, description = "Artist found", body = Artist),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn get_artist<A, L, T, F>(
    State(service): ArtistState<A, L, T, F>,
    Path(id): Path<String>,
) -> MusicResult<Json<Artist>>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    Ok(Json(service.get_artist(&id).await?))
}

#[utoipa::path(
    put,
    path = "/artist/{id}",
    tag = ARTISTS_TAG,
    params(("id" = String, Path, description = "Artist ID")),
    request_body = UpdateArtist,
    responses(
        (status = 200, description = "Artist updated", body = Artist),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn update_artist<A, L, T, F>(
    State(service): ArtistState<A, L, T, F>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateArtist>,
) -> MusicResult<Json<Artist>>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    Ok(Json(service.update_artist(&id, input).await?))
}

/// Delete an artist. Its albums and tracks stay, without the artist link.
#[utoipa::path(
    delete,
    path = "/artist/{id}",
    tag = ARTISTS_TAG,
    params(("id" = String, Path, description = "Artist ID")),
    responses(
        (status = 204, description = "Artist deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn delete_artist<A, L, T, F>(
    State(service): ArtistState<A, L, T, F>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> MusicResult<impl IntoResponse>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    let unlinked = service.delete_artist(&id).await?;

    AuditEvent::new("artist.delete", AuditOutcome::Success)
        .with_resource("artist", &id)
        .with_request_headers(&headers)
        .with_details(json!({ "unlinked": unlinked }))
        .log();

    Ok(StatusCode::NO_CONTENT)
}
