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

use super::TRACKS_TAG;
use crate::error::MusicResult;
use crate::models::{CreateTrack, Track, UpdateTrack};
use crate::repository::{FavoritesRepository, TrackRepository};
use crate::service::TrackService;

type TrackState<T, F> = State<Arc<TrackService<T, F>>>;

#[utoipa::path(
    get,
    path = "/track",
    tag = TRACKS_TAG,
    responses(
        (status = 200, description = "List of tracks", body = Vec<Track>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tracks<T: TrackRepository, F: FavoritesRepository>(
    State(service): TrackState<T, F>,
) -> MusicResult<Json<Vec<Track>>> {
    Ok(Json(service.list_tracks().await?))
}

#[utoipa::path(
    post,
    path = "/track",
    tag = TRACKS_TAG,
    request_body = CreateTrack,
    responses(
        (status = 201, description = "Track created", body = Track),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_track<T: TrackRepository, F: FavoritesRepository>(
    State(service): TrackState<T, F>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateTrack>,
) -> MusicResult<impl IntoResponse> {
    let track = service.create_track(input).await?;

    AuditEvent::new("track.create", AuditOutcome::Success)
        .with_resource("track", track.id)
        .with_request_headers(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(track)))
}

#[utoipa::path(
    get,
    path = "/track/{id}",
    tag = TRACKS_TAG,
    params(("id" = String, Path, description = "Track ID")),
    responses(
        (status = 200, description = "Track found", body = Track),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn get_track<T: TrackRepository, F: FavoritesRepository>(
    State(service): TrackState<T, F>,
    Path(id): Path<String>,
) -> MusicResult<Json<Track>> {
    Ok(Json(service.get_track(&id).await?))
}

#[utoipa::path(
    put,
    path = "/track/{id}",
    tag = TRACKS_TAG,
    params(("id" = String, Path, description = "Track ID")),
    request_body = UpdateTrack,
    responses(
        (status = 200, description = "Track updated", body = Track),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn update_track<T: TrackRepository, F: FavoritesRepository>(
    State(service): TrackState<T, F>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTrack>,
) -> MusicResult<Json<Track>> {
    Ok(Json(service.update_track(&id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/track/{id}",
    tag = TRACKS_TAG,
    params(("id" = String, Path, description = "Track ID")),
    responses(
        (status = 204, description = "Track deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
pub async fn delete_track<T: TrackRepository, F: FavoritesRepository>(
    State(service): TrackState<T, F>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> MusicResult<impl IntoResponse> {
    let was_favorite = service.delete_track(&id).await?;

    AuditEvent::new("track.delete", AuditOutcome::Success)
        .with_resource("track", &id)
        .with_request_headers(&headers)
        .with_details(json!({ "was_favorite": was_favorite }))
        .log();

    Ok(StatusCode::NO_CONTENT)
}
