//! Song catalog operations.

use crate::client::{expect_json, expect_success, ApiClient};
use crate::error::Result;
use reqwest::Method;
use setlist_core::{Song, SongId};
use tracing::debug;

const SONGS_PATH: &str = "/api/songs";

/// Song catalog client.
pub struct SongsClient<'a> {
    api: &'a ApiClient,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Get the full catalog.
    pub async fn list(&self) -> Result<Vec<Song>> {
        let request = self.api.request(Method::GET, SONGS_PATH)?;
        let songs: Vec<Song> = expect_json(self.api.execute(request).await?, "song list").await?;

        debug!(songs = songs.len(), "Fetched catalog");
        Ok(songs)
    }

    /// Get a single song by ID.
    pub async fn get(&self, id: SongId) -> Result<Song> {
        let request = self.api.request(Method::GET, &format!("{}/{}", SONGS_PATH, id))?;
        expect_json(self.api.execute(request).await?, &format!("song {}", id)).await
    }

    /// Create a song; the server assigns its ID.
    pub async fn create(&self, song: &Song) -> Result<Song> {
        let request = self.api.request(Method::POST, SONGS_PATH)?.json(song);
        let created: Song = expect_json(self.api.execute(request).await?, "created song").await?;

        debug!(song_id = ?created.id, title = %created.title, "Song created");
        Ok(created)
    }

    /// Replace a song's fields.
    pub async fn update(&self, id: SongId, song: &Song) -> Result<Song> {
        let request = self
            .api
            .request(Method::PUT, &format!("{}/{}", SONGS_PATH, id))?
            .json(song);
        expect_json(self.api.execute(request).await?, &format!("song {}", id)).await
    }

    pub async fn delete(&self, id: SongId) -> Result<()> {
        let request = self.api.request(Method::DELETE, &format!("{}/{}", SONGS_PATH, id))?;
        expect_success(self.api.execute(request).await?, &format!("song {}", id)).await?;

        debug!(song_id = %id, "Song deleted");
        Ok(())
    }
}
