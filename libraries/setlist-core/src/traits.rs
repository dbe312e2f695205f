/// Core traits for Setlist
use crate::error::Result;
use crate::types::{MembershipUpdateRequest, Playlist, PlaylistId, Song};
use async_trait::async_trait;

/// Remote calls the playlist detail session depends on.
///
/// The backend only offers whole-resource replacement, so membership changes
/// travel as a complete `MembershipUpdateRequest`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Fetch the full song catalog
    async fn list_songs(&self) -> Result<Vec<Song>>;

    /// Fetch one playlist with its current members
    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist>;

    /// Replace a playlist and return the server's resulting representation
    async fn replace_playlist(&self, request: &MembershipUpdateRequest) -> Result<Playlist>;
}
