use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::{Unlinked, validate};
use crate::error::{MusicError, MusicResult, parse_id};
use crate::models::{Album, CreateAlbum, EntityKind, UpdateAlbum};
use crate::repository::{AlbumRepository, FavoritesRepository, TrackRepository};

#[derive(Clone)]
pub struct AlbumService<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository> {
    albums: Arc<L>,
    tracks: Arc<T>,
    favorites: Arc<F>,
}

impl<L: AlbumRepository, T: TrackRepository, F: FavoritesRepository> AlbumService<L, T, F> {
    pub fn new(albums: L, tracks: T, favorites: F) -> Self {
        Self {
            albums: Arc::new(albums),
            tracks: Arc::new(tracks),
            favorites: Arc::new(favorites),
        }
    }

    pub async fn list_albums(&self) -> MusicResult<Vec<Album>> {
        self.albums.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_album(&self, id: &str) -> MusicResult<Album> {
        let id = parse_id("id", id)?;
        self.find_album(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_album(&self, input: CreateAlbum) -> MusicResult<Album> {
        validate(&input)?;
        self.albums.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_album(&self, id: &str, input: UpdateAlbum) -> MusicResult<Album> {
        let id = parse_id("id", id)?;
        validate(&input)?;
        self.find_album(id).await?;
        self.albums.update(id, input).await
    }

    /// Delete an album, unlink its tracks, and drop it from favorites
    #[instrument(skip(self))]
    pub async fn delete_album(&self, id: &str) -> MusicResult<Unlinked> {
        let id = parse_id("id", id)?;

        if !self.albums.delete(id).await? {
            return Err(MusicError::NotFound {
                kind: EntityKind::Album,
                id,
            });
        }

        Ok(Unlinked {
            albums: 0,
            tracks: self.tracks.on_album_deleted(id).await?,
            favorite: self.favorites.remove(EntityKind::Album, id).await?,
        })
    }

    async fn find_album(&self, id: Uuid) -> MusicResult<Album> {
        self.albums.get_by_id(id).await?.ok_or(MusicError::NotFound {
            kind: EntityKind::Album,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateTrack;
    use crate::repository::{
        InMemoryAlbumRepository, InMemoryFavoritesRepository, InMemoryTrackRepository,
        MockAlbumRepository, MockFavoritesRepository, MockTrackRepository,
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_update_checks_existence_first() {
        let id = Uuid::new_v4();
        let mut albums = MockAlbumRepository::new();
        albums
            .expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = AlbumService::new(
            albums,
            MockTrackRepository::new(),
            MockFavoritesRepository::new(),
        );

        let result = service
            .update_album(&id.to_string(), UpdateAlbum::default())
            .await;
        assert!(matches!(
            result,
            Err(MusicError::NotFound {
                kind: EntityKind::Album,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_album_keeps_track_artist() {
        let albums = InMemoryAlbumRepository::new();
        let tracks = InMemoryTrackRepository::new();
        let favorites = InMemoryFavoritesRepository::new();
        let service = AlbumService::new(albums.clone(), tracks.clone(), favorites.clone());

        let artist_id = Uuid::new_v4();
        let album = service
            .create_album(CreateAlbum {
                name: "TEST_ALBUM".into(),
                year: 2022,
                artist_id: Some(artist_id),
            })
            .await
            .unwrap();
        let track = tracks
            .create(CreateTrack {
                name: "Test track".into(),
                duration: 99,
                artist_id: Some(artist_id),
                album_id: Some(album.id),
            })
            .await
            .unwrap();

        let unlinked = service.delete_album(&album.id.to_string()).await.unwrap();
        assert_eq!(unlinked.tracks, 1);
        assert!(!unlinked.favorite);

        let track = tracks.get_by_id(track.id).await.unwrap().unwrap();
        assert_eq!(track.album_id, None);
        assert_eq!(track.artist_id, Some(artist_id));
        assert!(albums.get_all().await.unwrap().is_empty());
    }
}
