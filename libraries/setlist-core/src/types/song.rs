//! Song domain type

use super::ids::SongId;
use serde::{Deserialize, Serialize};

/// A song in the catalog.
///
/// `id` is assigned by the server and is absent on songs that have not been
/// created yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SongId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: String,
}

impl Song {
    /// Create an unsaved song with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Create a song with a specific ID (as returned by the server)
    pub fn with_id(id: SongId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title)
        }
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }
}
