//! Playlist domain types

use super::ids::{PlaylistId, SongId};
use super::song::Song;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Playlist as represented by the server, including its current members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,

    /// Members in server order
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Playlist {
    /// Create an empty playlist with a specific ID
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            songs: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_songs(mut self, songs: Vec<Song>) -> Self {
        self.songs = songs;
        self
    }

    /// The member-id set.
    ///
    /// An id the server reports twice appears once here.
    pub fn member_ids(&self) -> BTreeSet<SongId> {
        self.songs.iter().filter_map(|song| song.id).collect()
    }

    pub fn contains(&self, song_id: SongId) -> bool {
        self.songs.iter().any(|song| song.id == Some(song_id))
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_ids: Option<Vec<SongId>>,
}

impl NewPlaylist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            song_ids: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
