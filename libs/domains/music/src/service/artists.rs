use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::{Unlinked, validate};
use crate::error::{MusicError, MusicResult, parse_id};
use crate::models::{Artist, CreateArtist, EntityKind, UpdateArtist};
use crate::repository::{
    AlbumRepository, ArtistRepository, FavoritesRepository, TrackRepository,
};

/// Artists, plus the cleanup a removed artist leaves behind
#[derive(Clone)]
pub struct ArtistService<A, L, T, F>
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

impl<A, L, T, F> ArtistService<A, L, T, F>
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

    pub async fn list_artists(&self) -> MusicResult<Vec<Artist>> {
        self.artists.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_artist(&self, id: &str) -> MusicResult<Artist> {
        let id = parse_id("id", id)?;
        self.find_artist(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_artist(&self, input: CreateArtist) -> MusicResult<Artist> {
        validate(&input)?;
        self.artists.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_artist(&self, id: &str, input: UpdateArtist) -> MusicResult<Artist> {
        let id = parse_id("id", id)?;
        validate(&input)?;
        self.find_artist(id).await?;
        self.artists.update(id, input).await
    }

    /// Delete an artist, unlink its albums and tracks, and drop it from favorites
    #[instrument(skip(self))]
    pub async fn delete_artist(&self, id: &str) -> MusicResult<Unlinked> {
        let id = parse_id("id", id)?;

        if !self.artists.delete(id).await? {
            return Err(MusicError::NotFound {
                kind: EntityKind::Artist,
                id,
            });
        }

        Ok(Unlinked {
            albums: self.albums.on_artist_deleted(id).await?,
            tracks: self.tracks.on_artist_deleted(id).await?,
            favorite: self.favorites.remove(EntityKind::Artist, id).await?,
        })
    }

    async fn find_artist(&self, id: Uuid) -> MusicResult<Artist> {
        self.artists
            .get_by_id(id)
            .await?
            .ok_or(MusicError::NotFound {
                kind: EntityKind::Artist,
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateAlbum, CreateTrack};
    use crate::repository::{
        InMemoryAlbumRepository, InMemoryArtistRepository, InMemoryFavoritesRepository,
        InMemoryTrackRepository, MockAlbumRepository, MockArtistRepository,
        MockFavoritesRepository, MockTrackRepository,
    };

    #[tokio::test]
    async fn test_invalid_id_never_reaches_repository() {
        let service = ArtistService::new(
            MockArtistRepository::new(),
            MockAlbumRepository::new(),
            MockTrackRepository::new(),
            MockFavoritesRepository::new(),
        );

        for result in [
            service.get_artist("123").await.map(|_| ()),
            service.update_artist("123", UpdateArtist::default()).await.map(|_| ()),
            service.delete_artist("123").await.map(|_| ()),
        ] {
            assert!(matches!(result, Err(MusicError::InvalidId { field: "id", .. })));
        }
    }

    #[tokio::test]
    async fn test_missing_artist_skips_cascade() {
        let mut artists = MockArtistRepository::new();
        artists.expect_delete().times(1).returning(|_| Ok(false));

        // Cascade repositories have no expectations
        let service = ArtistService::new(
            artists,
            MockAlbumRepository::new(),
            MockTrackRepository::new(),
            MockFavoritesRepository::new(),
        );

        let result = service.delete_artist(&Uuid::new_v4().to_string()).await;
        assert!(matches!(
            result,
            Err(MusicError::NotFound {
                kind: EntityKind::Artist,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_artist_unlinks_everything() {
        let artists = InMemoryArtistRepository::new();
        let albums = InMemoryAlbumRepository::new();
        let tracks = InMemoryTrackRepository::new();
        let favorites = InMemoryFavoritesRepository::new();
        let service = ArtistService::new(
            artists.clone(),
            albums.clone(),
            tracks.clone(),
            favorites.clone(),
        );

        let artist = service
            .create_artist(CreateArtist {
                name: "TEST_artist".into(),
                grammy: false,
            })
            .await
            .unwrap();
        let album = albums
            .create(CreateAlbum {
                name: "TEST_ALBUM".into(),
                year: 2022,
                artist_id: Some(artist.id),
            })
            .await
            .unwrap();
        let track = tracks
            .create(CreateTrack {
                name: "Test track".into(),
                duration: 99,
                artist_id: Some(artist.id),
                album_id: Some(album.id),
            })
            .await
            .unwrap();
        favorites.add(EntityKind::Artist, artist.id).await.unwrap();

        let unlinked = service.delete_artist(&artist.id.to_string()).await.unwrap();
        assert_eq!(
            unlinked,
            Unlinked {
                albums: 1,
                tracks: 1,
                favorite: true
            }
        );

        assert_eq!(albums.get_by_id(album.id).await.unwrap().unwrap().artist_id, None);
        let track = tracks.get_by_id(track.id).await.unwrap().unwrap();
        assert_eq!(track.artist_id, None);
        assert_eq!(track.album_id, Some(album.id));
        assert!(favorites.get().await.unwrap().artists.is_empty());
        assert!(matches!(
            service.get_artist(&artist.id.to_string()).await,
            Err(MusicError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let service = ArtistService::new(
            MockArtistRepository::new(),
            MockAlbumRepository::new(),
            MockTrackRepository::new(),
            MockFavoritesRepository::new(),
        );

        let result = service
            .create_artist(CreateArtist {
                name: String::new(),
                grammy: true,
            })
            .await;
        assert!(matches!(result, Err(MusicError::Validation(_))));
    }
}
