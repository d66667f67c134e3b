//! Music Domain
//!
//! Artists, albums and tracks, plus a favorites list over all three.
//!
//! Records refer to each other by optional id. Deleting an artist or album
//! clears those references instead of deleting the records that hold them,
//! and any delete also drops the record from favorites.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_music::{
//!     handlers::{self, MusicServices},
//!     InMemoryAlbumRepository, InMemoryArtistRepository, InMemoryFavoritesRepository,
//!     InMemoryTrackRepository,
//! };
//!
//! let services = MusicServices::new(
//!     InMemoryArtistRepository::new(),
//!     InMemoryAlbumRepository::new(),
//!     InMemoryTrackRepository::new(),
//!     InMemoryFavoritesRepository::new(),
//! );
//!
//! let router = handlers::router(services);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{MusicError, MusicResult};
pub use handlers::{ApiDoc, MusicServices};
pub use models::{
    Album, Artist, CreateAlbum, CreateArtist, CreateTrack, EntityKind, Favorites,
    FavoritesResponse, Track, UpdateAlbum, UpdateArtist, UpdateTrack,
};
pub use repository::{
    AlbumRepository, ArtistRepository, FavoritesRepository, InMemoryAlbumRepository,
    InMemoryArtistRepository, InMemoryFavoritesRepository, InMemoryTrackRepository,
    TrackRepository,
};
pub use service::{AlbumService, ArtistService, FavoritesService, TrackService, Unlinked};
