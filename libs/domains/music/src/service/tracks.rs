use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::validate;
use crate::error::{MusicError, MusicResult, parse_id};
use crate::models::{CreateTrack, EntityKind, Track, UpdateTrack};
use crate::repository::{FavoritesRepository, TrackRepository};

#[derive(Clone)]
pub struct TrackService<T: TrackRepository, F: FavoritesRepository> {
    tracks: Arc<T>,
    favorites: Arc<F>,
}

impl<T: TrackRepository, F: FavoritesRepository> TrackService<T, F> {
    pub fn new(tracks: T, favorites: F) -> Self {
        Self {
            tracks: Arc::new(tracks),
            favorites: Arc::new(favorites),
        }
    }

    pub async fn list_tracks(&self) -> MusicResult<Vec<Track>> {
        self.tracks.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_track(&self, id: &str) -> MusicResult<Track> {
        let id = parse_id("id", id)?;
        self.find_track(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_track(&self, input: CreateTrack) -> MusicResult<Track> {
        validate(&input)?;
        self.tracks.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_track(&self, id: &str, input: UpdateTrack) -> MusicResult<Track> {
        let id = parse_id("id", id)?;
        validate(&input)?;
        self.find_track(id).await?;
        self.tracks.update(id, input).await
    }

    /// Delete a track and drop it from favorites.
    ///
    /// Returns whether it was a favorite.
    #[instrument(skip(self))]
    pub async fn delete_track(&self, id: &str) -> MusicResult<bool> {
        let id = parse_id("id", id)?;

        if !self.tracks.delete(id).await? {
            return Err(MusicError::NotFound {
                kind: EntityKind::Track,
                id,
            });
        }

        self.favorites.remove(EntityKind::Track, id).await
    }

    async fn find_track(&self, id: Uuid) -> MusicResult<Track> {
        self.tracks.get_by_id(id).await?.ok_or(MusicError::NotFound {
            kind: EntityKind::Track,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        InMemoryFavoritesRepository, InMemoryTrackRepository, MockFavoritesRepository,
        MockTrackRepository,
    };

    #[tokio::test]
    async fn test_invalid_id_never_reaches_repository() {
        let service = TrackService::new(MockTrackRepository::new(), MockFavoritesRepository::new());

        assert!(matches!(
            service.delete_track("not-a-uuid").await,
            Err(MusicError::InvalidId { .. })
        ));
        assert!(matches!(
            service.get_track("not-a-uuid").await,
            Err(MusicError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_track_drops_favorite() {
        let tracks = InMemoryTrackRepository::new();
        let favorites = InMemoryFavoritesRepository::new();
        let service = TrackService::new(tracks, favorites.clone());

        let track = service
            .create_track(CreateTrack {
                name: "Test track".into(),
                duration: 99,
                artist_id: None,
                album_id: None,
            })
            .await
            .unwrap();
        favorites.add(EntityKind::Track, track.id).await.unwrap();

        assert!(service.delete_track(&track.id.to_string()).await.unwrap());
        assert!(favorites.get().await.unwrap().tracks.is_empty());
        assert!(matches!(
            service.delete_track(&track.id.to_string()).await,
            Err(MusicError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let service = TrackService::new(
            InMemoryTrackRepository::new(),
            InMemoryFavoritesRepository::new(),
        );
        let track = service
            .create_track(CreateTrack {
                name: "Test track".into(),
                duration: 99,
                artist_id: None,
                album_id: None,
            })
            .await
            .unwrap();

        let updated = service
            .update_track(
                &track.id.to_string(),
                UpdateTrack {
                    duration: Some(188),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.duration, 188);
        assert_eq!(updated.name, "Test track");
    }
}
