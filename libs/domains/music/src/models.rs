use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// The three record families of the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Artist,
    Album,
    Track,
}

impl EntityKind {
    /// Lowercase name, as used in favorites paths
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Album => "album",
            EntityKind::Track => "track",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Artist => write!(f, "Artist"),
            EntityKind::Album => write!(f, "Album"),
            EntityKind::Track => write!(f, "Track"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Parses the lowercase path segment used by the favorites routes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(EntityKind::Artist),
            "album" => Ok(EntityKind::Album),
            "track" => Ok(EntityKind::Track),
            other => Err(format!("Unknown favorites kind: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub grammy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub artist_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: Uuid,
    pub name: String,
    /// Seconds
    pub duration: u32,
    pub artist_id: Option<Uuid>,
    pub album_id: Option<Uuid>,
}

/// Favorite ids, each list in the order the ids were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    pub artists: Vec<Uuid>,
    pub albums: Vec<Uuid>,
    pub tracks: Vec<Uuid>,
}

impl Favorites {
    pub fn ids(&self, kind: EntityKind) -> &[Uuid] {
        match kind {
            EntityKind::Artist => &self.artists,
            EntityKind::Album => &self.albums,
            EntityKind::Track => &self.tracks,
        }
    }

    pub fn ids_mut(&mut self, kind: EntityKind) -> &mut Vec<Uuid> {
        match kind {
            EntityKind::Artist => &mut self.artists,
            EntityKind::Album => &mut self.albums,
            EntityKind::Track => &mut self.tracks,
        }
    }
}

/// Favorites expanded into full records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoritesResponse {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArtist {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub grammy: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateArtist {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub grammy: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbum {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0, max = 9999))]
    pub year: i32,
    pub artist_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbum {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 9999))]
    pub year: Option<i32>,
    #[serde(default, with = "axum_helpers::nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub artist_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrack {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub duration: u32,
    pub artist_id: Option<Uuid>,
    pub album_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrack {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub duration: Option<u32>,
    #[serde(default, with = "axum_helpers::nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub artist_id: Option<Option<Uuid>>,
    #[serde(default, with = "axum_helpers::nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub album_id: Option<Option<Uuid>>,
}

impl Artist {
    pub fn new(input: CreateArtist) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            grammy: input.grammy,
        }
    }

    pub fn apply_update(&mut self, update: UpdateArtist) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(grammy) = update.grammy {
            self.grammy = grammy;
        }
    }
}

impl Album {
    pub fn new(input: CreateAlbum) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            year: input.year,
            artist_id: input.artist_id,
        }
    }

    pub fn apply_update(&mut self, update: UpdateAlbum) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(artist_id) = update.artist_id {
            self.artist_id = artist_id;
        }
    }
}

impl Track {
    pub fn new(input: CreateTrack) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            duration: input.duration,
            artist_id: input.artist_id,
            album_id: input.album_id,
        }
    }

    pub fn apply_update(&mut self, update: UpdateTrack) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
        if let Some(artist_id) = update.artist_id {
            self.artist_id = artist_id;
        }
        if let Some(album_id) = update.album_id {
            self.album_id = album_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_fields() {
        assert!(serde_json::from_str::<CreateArtist>(r#"{"name":"TEST_artist"}"#).is_err());
        assert!(serde_json::from_str::<CreateTrack>(r#"{"duration":99}"#).is_err());
        assert!(
            serde_json::from_str::<CreateTrack>(r#"{"name":null,"duration":"99"}"#).is_err()
        );
    }

    #[test]
    fn test_track_update_clears_album_on_null() {
        let mut track = Track::new(CreateTrack {
            name: "Test track".into(),
            duration: 335,
            artist_id: Some(Uuid::new_v4()),
            album_id: Some(Uuid::new_v4()),
        });
        let artist_id = track.artist_id;

        let update: UpdateTrack = serde_json::from_str(r#"{"albumId":null}"#).unwrap();
        track.apply_update(update);

        assert_eq!(track.album_id, None);
        assert_eq!(track.artist_id, artist_id);
        assert_eq!(track.duration, 335);
    }

    #[test]
    fn test_album_serializes_camel_case() {
        let album = Album::new(CreateAlbum {
            name: "TEST_ALBUM".into(),
            year: 2022,
            artist_id: None,
        });
        let json = serde_json::to_value(&album).unwrap();
        assert!(json["artistId"].is_null());
        assert_eq!(json["year"], 2022);
    }

    #[test]
    fn test_entity_kind_path_names() {
        let kind: EntityKind = serde_json::from_str(r#""track""#).unwrap();
        assert_eq!(kind, EntityKind::Track);
        assert_eq!(kind.to_string(), "Track");
        assert_eq!("album".parse::<EntityKind>(), Ok(EntityKind::Album));
        assert!("albums".parse::<EntityKind>().is_err());
    }
}
