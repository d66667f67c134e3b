use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{MusicError, MusicResult};
use crate::models::{
    Album, Artist, CreateAlbum, CreateArtist, CreateTrack, EntityKind, Favorites, Track,
    UpdateAlbum, UpdateArtist, UpdateTrack,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn get_all(&self) -> MusicResult<Vec<Artist>>;

    async fn get_by_id(&self, id: Uuid) -> MusicResult<Option<Artist>>;

    async fn create(&self, input: CreateArtist) -> MusicResult<Artist>;

    async fn update(&self, id: Uuid, input: UpdateArtist) -> MusicResult<Artist>;

    /// Returns false if no artist had this id
    async fn delete(&self, id: Uuid) -> MusicResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn get_all(&self) -> MusicResult<Vec<Album>>;

    async fn get_by_id(&self, id: Uuid) -> MusicResult<Option<Album>>;

    async fn create(&self, input: CreateAlbum) -> MusicResult<Album>;

    async fn update(&self, id: Uuid, input: UpdateAlbum) -> MusicResult<Album>;

    async fn delete(&self, id: Uuid) -> MusicResult<bool>;

    /// Clear `artist_id` on the artist's albums. Returns how many changed.
    async fn on_artist_deleted(&self, artist_id: Uuid) -> MusicResult<usize>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackRepository: Send + Sync {
    async fn get_all(&self) -> MusicResult<Vec<Track>>;

    async fn get_by_id(&self, id: Uuid) -> MusicResult<Option<Track>>;

    async fn create(&self, input: CreateTrack) -> MusicResult<Track>;

    async fn update(&self, id: Uuid, input: UpdateTrack) -> MusicResult<Track>;

    async fn delete(&self, id: Uuid) -> MusicResult<bool>;

    /// Clear `artist_id` on the artist's tracks. Returns how many changed.
    async fn on_artist_deleted(&self, artist_id: Uuid) -> MusicResult<usize>;

    /// Clear `album_id` on the album's tracks. Returns how many changed.
    async fn on_album_deleted(&self, album_id: Uuid) -> MusicResult<usize>;
}

/// Favorite ids per kind. An id appears at most once per kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    async fn get(&self) -> MusicResult<Favorites>;

    /// Returns false if the id was already a favorite
    async fn add(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool>;

    /// Returns false if the id was not a favorite
    async fn remove(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool>;

    async fn contains(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool>;
}

trait Record: Clone {
    const KIND: EntityKind;

    fn id(&self) -> Uuid;
}

impl Record for Artist {
    const KIND: EntityKind = EntityKind::Artist;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Album {
    const KIND: EntityKind = EntityKind::Album;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Track {
    const KIND: EntityKind = EntityKind::Track;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Shared, insertion-ordered record list behind the in-memory repositories
#[derive(Debug)]
struct Collection<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Record> Collection<T> {
    async fn all(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn find(&self, id: Uuid) -> Option<T> {
        let records = self.records.read().await;
        records.iter().find(|r| r.id() == id).cloned()
    }

    async fn insert(&self, record: T) -> T {
        self.records.write().await.push(record.clone());
        tracing::info!(kind = %T::KIND, id = %record.id(), "Created record");
        record
    }

    async fn modify(&self, id: Uuid, apply: impl FnOnce(&mut T)) -> MusicResult<T> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(MusicError::NotFound { kind: T::KIND, id })?;

        apply(record);

        tracing::info!(kind = %T::KIND, id = %id, "Updated record");
        Ok(record.clone())
    }

    async fn remove(&self, id: Uuid) -> bool {
        let mut records = self.records.write().await;

        match records.iter().position(|r| r.id() == id) {
            Some(index) => {
                records.remove(index);
                tracing::info!(kind = %T::KIND, id = %id, "Deleted record");
                true
            }
            None => false,
        }
    }

    /// Set every matching reference to `None` under one write lock
    async fn clear_refs(&self, field: fn(&mut T) -> &mut Option<Uuid>, target: Uuid) -> usize {
        let mut records = self.records.write().await;
        let mut changed = 0;

        for record in records.iter_mut() {
            let slot = field(record);
            if *slot == Some(target) {
                *slot = None;
                changed += 1;
            }
        }
        changed
    }
}

/// In-memory implementation of ArtistRepository.
///
/// Clones share the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryArtistRepository {
    artists: Collection<Artist>,
}

impl InMemoryArtistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtistRepository for InMemoryArtistRepository {
    async fn get_all(&self) -> MusicResult<Vec<Artist>> {
        Ok(self.artists.all().await)
    }

    async fn get_by_id(&self, id: Uuid) -> MusicResult<Option<Artist>> {
        Ok(self.artists.find(id).await)
    }

    async fn create(&self, input: CreateArtist) -> MusicResult<Artist> {
        Ok(self.artists.insert(Artist::new(input)).await)
    }

    async fn update(&self, id: Uuid, input: UpdateArtist) -> MusicResult<Artist> {
        self.artists.modify(id, |a| a.apply_update(input)).await
    }

    async fn delete(&self, id: Uuid) -> MusicResult<bool> {
        Ok(self.artists.remove(id).await)
    }
}

/// In-memory implementation of AlbumRepository.
///
/// Clones share the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAlbumRepository {
    albums: Collection<Album>,
}

impl InMemoryAlbumRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn get_all(&self) -> MusicResult<Vec<Album>> {
        Ok(self.albums.all().await)
    }

    async fn get_by_id(&self, id: Uuid) -> MusicResult<Option<Album>> {
        Ok(self.albums.find(id).await)
    }

    async fn create(&self, input: CreateAlbum) -> MusicResult<Album> {
        Ok(self.albums.insert(Album::new(input)).await)
    }

    async fn update(&self, id: Uuid, input: UpdateAlbum) -> MusicResult<Album> {
        self.albums.modify(id, |a| a.apply_update(input)).await
    }

    async fn delete(&self, id: Uuid) -> MusicResult<bool> {
        Ok(self.albums.remove(id).await)
    }

    async fn on_artist_deleted(&self, artist_id: Uuid) -> MusicResult<usize> {
        let changed = self
            .albums
            .clear_refs(|a| &mut a.artist_id, artist_id)
            .await;

        tracing::info!(artist_id = %artist_id, changed, "Unlinked albums of deleted artist");
        Ok(changed)
    }
}

/// In-memory implementation of TrackRepository.
///
/// Clones share the same collection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTrackRepository {
    tracks: Collection<Track>,
}

impl InMemoryTrackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackRepository for InMemoryTrackRepository {
    async fn get_all(&self) -> MusicResult<Vec<Track>> {
        Ok(self.tracks.all().await)
    }

    async fn get_by_id(&self, id: Uuid) -> MusicResult<Option<Track>> {
        Ok(self.tracks.find(id).await)
    }

    async fn create(&self, input: CreateTrack) -> MusicResult<Track> {
        Ok(self.tracks.insert(Track::new(input)).await)
    }

    async fn update(&self, id: Uuid, input: UpdateTrack) -> MusicResult<Track> {
        self.tracks.modify(id, |t| t.apply_update(input)).await
    }

    async fn delete(&self, id: Uuid) -> MusicResult<bool> {
        Ok(self.tracks.remove(id).await)
    }

    async fn on_artist_deleted(&self, artist_id: Uuid) -> MusicResult<usize> {
        let changed = self
            .tracks
            .clear_refs(|t| &mut t.artist_id, artist_id)
            .await;

        tracing::info!(artist_id = %artist_id, changed, "Unlinked tracks of deleted artist");
        Ok(changed)
    }

    async fn on_album_deleted(&self, album_id: Uuid) -> MusicResult<usize> {
        let changed = self.tracks.clear_refs(|t| &mut t.album_id, album_id).await;

        tracing::info!(album_id = %album_id, changed, "Unlinked tracks of deleted album");
        Ok(changed)
    }
}

/// In-memory implementation of FavoritesRepository.
///
/// Clones share the same lists.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFavoritesRepository {
    favorites: Arc<RwLock<Favorites>>,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn get(&self) -> MusicResult<Favorites> {
        Ok(self.favorites.read().await.clone())
    }

    async fn add(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool> {
        let mut favorites = self.favorites.write().await;
        let ids = favorites.ids_mut(kind);

        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);

        tracing::info!(kind = %kind, id = %id, "Added favorite");
        Ok(true)
    }

    async fn remove(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool> {
        let mut favorites = self.favorites.write().await;
        let ids = favorites.ids_mut(kind);

        match ids.iter().position(|fav| *fav == id) {
            Some(index) => {
                ids.remove(index);
                tracing::info!(kind = %kind, id = %id, "Removed favorite");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn contains(&self, kind: EntityKind, id: Uuid) -> MusicResult<bool> {
        Ok(self.favorites.read().await.ids(kind).contains(&id))
    }
}
