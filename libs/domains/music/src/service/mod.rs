mod albums;
mod artists;
mod favorites;
mod tracks;

pub use albums::AlbumService;
pub use artists::ArtistService;
pub use favorites::FavoritesService;
pub use tracks::TrackService;

use serde::Serialize;
use validator::Validate;

use crate::error::{MusicError, MusicResult};

fn validate<T: Validate>(input: &T) -> MusicResult<()> {
    input
        .validate()
        .map_err(|e| MusicError::Validation(e.to_string()))
}

/// What a delete cascaded into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Unlinked {
    pub albums: usize,
    pub tracks: usize,
    /// Whether the record was also dropped from favorites
    pub favorite: bool,
}
