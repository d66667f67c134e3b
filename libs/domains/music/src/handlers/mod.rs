mod albums;
mod artists;
mod favorites;
mod tracks;

use axum::{
    Router,
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse, UnprocessableEntityResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    Album, Artist, CreateAlbum, CreateArtist, CreateTrack, EntityKind, FavoritesResponse, Track,
    UpdateAlbum, UpdateArtist, UpdateTrack,
};
use crate::repository::{
    AlbumRepository, ArtistRepository, FavoritesRepository, TrackRepository,
};
use crate::service::{AlbumService, ArtistService, FavoritesService, TrackService};

pub const ARTISTS_TAG: &str = "Artists";
pub const ALBUMS_TAG: &str = "Albums";
pub const TRACKS_TAG: &str = "Tracks";
pub const FAVORITES_TAG: &str = "Favorites";

/// OpenAPI documentation for the music library (mounted at the API root)
#[derive(OpenApi)]
#[openapi(
    paths(
        artists::list_artists,
        artists::create_artist,
        artists::get_artist,
        artists::update_artist,
        artists::delete_artist,
        albums::list_albums,
        albums::create_album,
        albums::get_album,
        albums::update_album,
        albums::delete_album,
        tracks::list_tracks,
        tracks::create_track,
        tracks::get_track,
        tracks::update_track,
        tracks::delete_track,
        favorites::get_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
    ),
    components(
        schemas(
            Artist, CreateArtist, UpdateArtist,
            Album, CreateAlbum, UpdateAlbum,
            Track, CreateTrack, UpdateTrack,
            EntityKind, FavoritesResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ARTISTS_TAG, description = "Artist management endpoints"),
        (name = ALBUMS_TAG, description = "Album management endpoints"),
        (name = TRACKS_TAG, description = "Track management endpoints"),
        (name = FAVORITES_TAG, description = "Favorite artists, albums and tracks")
    )
)]
pub struct ApiDoc;

/// The music services, built over one shared set of repositories
pub struct MusicServices<A, L, T, F>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    pub artists: ArtistService<A, L, T, F>,
    pub albums: AlbumService<L, T, F>,
    pub tracks: TrackService<T, F>,
    pub favorites: FavoritesService<A, L, T, F>,
}

impl<A, L, T, F> MusicServices<A, L, T, F>
where
    A: ArtistRepository + Clone,
    L: AlbumRepository + Clone,
    T: TrackRepository + Clone,
    F: FavoritesRepository + Clone,
{
    /// Every service sees the same collections, so repositories must share
    /// state across clones.
    pub fn new(artists: A, albums: L, tracks: T, favorites: F) -> Self {
        Self {
            artists: ArtistService::new(
                artists.clone(),
                albums.clone(),
                tracks.clone(),
                favorites.clone(),
            ),
            albums: AlbumService::new(albums.clone(), tracks.clone(), favorites.clone()),
            tracks: TrackService::new(tracks.clone(), favorites.clone()),
            favorites: FavoritesService::new(artists, albums, tracks, favorites),
        }
    }
}

/// Artist, album, track and favorites routes
pub fn router<A, L, T, F>(services: MusicServices<A, L, T, F>) -> Router
where
    A: ArtistRepository + 'static,
    L: AlbumRepository + 'static,
    T: TrackRepository + 'static,
    F: FavoritesRepository + 'static,
{
    let artists = Router::new()
        .route(
            "/artist",
            get(artists::list_artists).post(artists::create_artist),
        )
        .route(
            "/artist/{id}",
            get(artists::get_artist)
                .put(artists::update_artist)
                .delete(artists::delete_artist),
        )
        .with_state(Arc::new(services.artists));

    let albums = Router::new()
        .route("/album", get(albums::list_albums).post(albums::create_album))
        .route(
            "/album/{id}",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        .with_state(Arc::new(services.albums));

    let tracks = Router::new()
        .route("/track", get(tracks::list_tracks).post(tracks::create_track))
        .route(
            "/track/{id}",
            get(tracks::get_track)
                .put(tracks::update_track)
                .delete(tracks::delete_track),
        )
        .with_state(Arc::new(services.tracks));

    let favorites = Router::new()
        .route("/favs", get(favorites::get_favorites))
        .route(
            "/favs/{kind}/{id}",
            post(favorites::add_favorite).delete(favorites::remove_favorite),
        )
        .with_state(Arc::new(services.favorites));

    artists.merge(albums).merge(tracks).merge(favorites)
}
