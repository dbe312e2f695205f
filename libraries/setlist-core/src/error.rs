/// Core error types for Setlist
use thiserror::Error;
use crate::types::{PlaylistId, SongId};

/// Result type alias using `SetlistError`
pub type Result<T> = std::result::Result<T, SetlistError>;

/// Core error type for Setlist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetlistError {
    /// Authentication was rejected by the backend
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The song is already part of the playlist
    #[error("Song {song} is already in playlist {playlist}")]
    AlreadyMember { playlist: PlaylistId, song: SongId },

    /// The song is not part of the loaded catalog
    #[error("Song not found in catalog: {0}")]
    UnknownSong(SongId),

    /// A membership change for this playlist is still outstanding
    #[error("A membership change for playlist {0} is already in progress")]
    SubmissionInProgress(PlaylistId),

    /// Catalog or playlist has not been loaded yet
    #[error("Playlist detail is not loaded yet")]
    NotReady,

    /// Any network or backend failure
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SetlistError {
    /// Create a request failure
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Local precondition failures that never reached the network.
    ///
    /// Callers should surface these as feedback, not as failures.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMember { .. } | Self::UnknownSong(_) | Self::NotReady
        )
    }
}
