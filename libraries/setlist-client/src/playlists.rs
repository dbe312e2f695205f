//! Playlist operations.
//!
//! Updates are whole-resource replacements; there is no endpoint that adds or
//! removes a single member.

use crate::client::{expect_json, expect_success, ApiClient};
use crate::error::Result;
use reqwest::Method;
use setlist_core::{MembershipUpdateRequest, NewPlaylist, Playlist, PlaylistId};
use tracing::debug;

const PLAYLISTS_PATH: &str = "/api/playlists";

/// Playlist client.
pub struct PlaylistsClient<'a> {
    api: &'a ApiClient,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let request = self.api.request(Method::GET, PLAYLISTS_PATH)?;
        let playlists: Vec<Playlist> =
            expect_json(self.api.execute(request).await?, "playlist list").await?;

        debug!(playlists = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// Get a playlist with its current members.
    pub async fn get(&self, id: PlaylistId) -> Result<Playlist> {
        let request = self
            .api
            .request(Method::GET, &format!("{}/{}", PLAYLISTS_PATH, id))?;
        expect_json(self.api.execute(request).await?, &format!("playlist {}", id)).await
    }

    pub async fn create(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        let request = self.api.request(Method::POST, PLAYLISTS_PATH)?.json(playlist);
        let created: Playlist =
            expect_json(self.api.execute(request).await?, "created playlist").await?;

        debug!(playlist_id = %created.id, name = %created.name, "Playlist created");
        Ok(created)
    }

    /// Replace a playlist and return the server's resulting representation.
    pub async fn replace(
        &self,
        id: PlaylistId,
        request: &MembershipUpdateRequest,
    ) -> Result<Playlist> {
        debug!(playlist_id = %id, members = request.song_ids.len(), "Replacing playlist");

        let builder = self
            .api
            .request(Method::PUT, &format!("{}/{}", PLAYLISTS_PATH, id))?
            .json(request);
        expect_json(self.api.execute(builder).await?, &format!("playlist {}", id)).await
    }

    /// Change name and description while keeping the members of `snapshot`.
    pub async fn update_details(
        &self,
        snapshot: &Playlist,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Playlist> {
        let mut request = MembershipUpdateRequest::from_snapshot(snapshot, snapshot.member_ids());
        request.name = name.into();
        request.description = description;
        self.replace(snapshot.id, &request).await
    }

    pub async fn delete(&self, id: PlaylistId) -> Result<()> {
        let request = self
            .api
            .request(Method::DELETE, &format!("{}/{}", PLAYLISTS_PATH, id))?;
        expect_success(self.api.execute(request).await?, &format!("playlist {}", id)).await?;

        debug!(playlist_id = %id, "Playlist deleted");
        Ok(())
    }
}
