use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{MusicError, MusicResult, parse_id};
use crate::models::{EntityKind, FavoritesResponse};
use crate::repository::{
    AlbumRepository, ArtistRepository, FavoritesRepository, TrackRepository,
};

/// Favorites across all three kinds.
///
/// Only existing records can be added. Listing expands ids into records and
/// skips any id whose record is gone.
#[derive(Clone)]
pub struct FavoritesService<A, L, T, F>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    artists: Arc<A>,
    albums: Arc<L>,
    tracks: Arc<T>,
    favorites: Arc<F>,
}

fn in_order<R>(ids: &[Uuid], records: Vec<R>, id_of: fn(&R) -> Uuid) -> Vec<R> {
    let mut by_id: HashMap<Uuid, R> = records.into_iter().map(|r| (id_of(&r), r)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

impl<A, L, T, F> FavoritesService<A, L, T, F>
where
    A: ArtistRepository,
    L: AlbumRepository,
    T: TrackRepository,
    F: FavoritesRepository,
{
    pub fn new(artists: A, albums: L, tracks: T, favorites: F) -> Self {
        Self {
            artists: Arc::new(artists),
            albums: Arc::new(albums),
            tracks: Arc::new(tracks),
            favorites: Arc::new(favorites),
        }
    }

    /// Favorite records in the order they were added
    pub async fn get_favorites(&self) -> MusicResult<FavoritesResponse> {
        let favorites = self.favorites.get().await?;

        Ok(FavoritesResponse {
            artists: in_order(&favorites.artists, self.artists.get_all().await?, |a| a.id),
            albums: in_order(&favorites.albums, self.albums.get_all().await?, |a| a.id),
            tracks: in_order(&favorites.tracks, self.tracks.get_all().await?, |t| t.id),
        })
    }

    /// Add a favorite. Adding an id twice keeps a single entry.
    #[instrument(skip(self))]
    pub async fn add_favorite(&self, kind: EntityKind, id: &str) -> MusicResult<Uuid> {
        let id = parse_id("id", id)?;

        if !self.exists(kind, id).await? {
            return Err(MusicError::Unprocessable { kind, id });
        }

        self.favorites.add(kind, id).await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, kind: EntityKind, id: &str) -> MusicResult<()> {
        let id = parse_id("id", id)?;

        if !self.favorites.remove(kind, id).await? {
            return Err(MusicError::NotFavorite { kind, id });
        }

        Ok(())
    }

    async fn exists(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool> {
        Ok(match kind {
            EntityKind::Artist => self.artists.get_by_id(id).await?.is_some(),
            EntityKind::Album => self.albums.get_by_id(id).await?.is_some(),
            EntityKind::Track => self.tracks.get_by_id(id).await?.is_some(),
        })
    }
}
