//! The repositories behind every service.
//!
//! Each collection is created exactly once. Services receive clones, and a
//! clone shares its collection with the original, so a cascade issued by one
//! service is visible to all the others.

use domain_boards::{BoardLock, InMemoryBoardRepository, InMemoryTaskRepository};
use domain_music::{
    InMemoryAlbumRepository, InMemoryArtistRepository, InMemoryFavoritesRepository,
    InMemoryTrackRepository,
};
use domain_users::InMemoryUserRepository;

#[derive(Clone, Default)]
pub struct Repositories {
    pub users: InMemoryUserRepository,
    pub boards: InMemoryBoardRepository,
    pub tasks: InMemoryTaskRepository,
    pub board_lock: BoardLock,
    pub artists: InMemoryArtistRepository,
    pub albums: InMemoryAlbumRepository,
    pub tracks: InMemoryTrackRepository,
    pub favorites: InMemoryFavoritesRepository,
}

impl Repositories {
    pub fn new() -> Self {
        Self::default()
    }
}
