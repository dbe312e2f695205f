//! Playlist detail session.
//!
//! Owns the working copy of one playlist and the full catalog for as long as
//! the detail view is open, derives the complement (songs that can still be
//! added), and submits membership changes one at a time.
//!
//! ```text
//! Loading ──(catalog + playlist loaded)──▶ Ready ──apply──▶ Submitting
//!                                            ▲                  │
//!                                            └──success/failure─┘
//! ```

use crate::error::{Result, SetlistError};
use crate::membership::{add_member, complement, remove_member};
use crate::single_flight::{InFlightGuard, SingleFlight};
use crate::traits::CatalogBackend;
use crate::types::{MembershipUpdateRequest, Playlist, PlaylistId, Song, SongId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Where the detail session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    /// Catalog, playlist, or both are still missing
    Loading,
    /// Complement is computed and a change may be requested
    Ready,
    /// A replacement for this playlist is outstanding
    Submitting,
}

#[derive(Debug, Default)]
struct DetailState {
    catalog: Option<Vec<Song>>,
    playlist: Option<Playlist>,
    complement: Vec<Song>,
}

impl DetailState {
    /// Recompute the complement once both sources are present.
    fn refresh_complement(&mut self) {
        if let (Some(catalog), Some(playlist)) = (&self.catalog, &self.playlist) {
            self.complement = complement(catalog, playlist);
            debug!(
                playlist_id = %playlist.id,
                members = playlist.songs.len(),
                available = self.complement.len(),
                "Recomputed complement"
            );
        }
    }

    fn is_loaded(&self) -> bool {
        self.catalog.is_some() && self.playlist.is_some()
    }
}

/// Membership editor for a single playlist.
///
/// The server is the source of truth: after every successful change the
/// local playlist is replaced by the server's response, never by the locally
/// computed member set.
pub struct PlaylistDetail<B> {
    backend: Arc<B>,
    playlist_id: PlaylistId,
    state: RwLock<DetailState>,
    in_flight: SingleFlight,
}

impl<B: CatalogBackend> PlaylistDetail<B> {
    /// Create a session with its own single-flight registry.
    pub fn new(backend: Arc<B>, playlist_id: PlaylistId) -> Self {
        Self::with_single_flight(backend, playlist_id, SingleFlight::new())
    }

    /// Create a session that shares `in_flight` with other sessions.
    pub fn with_single_flight(
        backend: Arc<B>,
        playlist_id: PlaylistId,
        in_flight: SingleFlight,
    ) -> Self {
        Self {
            backend,
            playlist_id,
            state: RwLock::new(DetailState::default()),
            in_flight,
        }
    }

    pub fn playlist_id(&self) -> PlaylistId {
        self.playlist_id
    }

    /// Fetch catalog and playlist concurrently.
    ///
    /// Whichever load succeeds is installed even if the other fails; the first
    /// failure is returned.
    pub async fn load(&self) -> Result<()> {
        debug!(playlist_id = %self.playlist_id, "Loading playlist detail");

        let (catalog, playlist) = tokio::join!(
            self.backend.list_songs(),
            self.backend.get_playlist(self.playlist_id)
        );

        let mut first_error = None;

        match catalog {
            Ok(songs) => self.set_catalog(songs).await,
            Err(e) => {
                warn!(error = %e, "Failed to load catalog");
                first_error.get_or_insert(e);
            }
        }

        match playlist {
            Ok(playlist) => {
                if let Err(e) = self.set_playlist(playlist).await {
                    first_error.get_or_insert(e);
                }
            }
            Err(e) => {
                warn!(playlist_id = %self.playlist_id, error = %e, "Failed to load playlist");
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Install a freshly fetched catalog.
    pub async fn set_catalog(&self, songs: Vec<Song>) {
        let mut state = self.state.write().await;
        state.catalog = Some(songs);
        state.refresh_complement();
    }

    /// Install a freshly fetched playlist snapshot.
    pub async fn set_playlist(&self, playlist: Playlist) -> Result<()> {
        if playlist.id != self.playlist_id {
            return Err(SetlistError::invalid_input(format!(
                "expected playlist {}, got {}",
                self.playlist_id, playlist.id
            )));
        }

        let mut state = self.state.write().await;
        state.playlist = Some(playlist);
        state.refresh_complement();
        Ok(())
    }

    pub async fn phase(&self) -> DetailPhase {
        if self.in_flight.is_in_flight(self.playlist_id) {
            DetailPhase::Submitting
        } else if self.state.read().await.is_loaded() {
            DetailPhase::Ready
        } else {
            DetailPhase::Loading
        }
    }

    pub async fn playlist(&self) -> Option<Playlist> {
        self.state.read().await.playlist.clone()
    }

    pub async fn catalog(&self) -> Option<Vec<Song>> {
        self.state.read().await.catalog.clone()
    }

    /// Songs that can still be added. Empty until both loads completed.
    pub async fn complement(&self) -> Vec<Song> {
        self.state.read().await.complement.clone()
    }

    /// Add a catalog song to the playlist.
    ///
    /// `AlreadyMember` and `UnknownSong` are reported without any request.
    pub async fn add_song(&self, song_id: SongId) -> Result<Playlist> {
        let guard = self.acquire()?;
        let request = {
            let state = self.state.read().await;
            let (Some(playlist), Some(catalog)) = (&state.playlist, &state.catalog) else {
                return Err(SetlistError::NotReady);
            };
            add_member(playlist, catalog, song_id)?
        };

        self.submit(guard, request).await
    }

    /// Remove a song from the playlist. Removing a non-member still submits
    /// the unchanged member set.
    pub async fn remove_song(&self, song_id: SongId) -> Result<Playlist> {
        let guard = self.acquire()?;
        let request = {
            let state = self.state.read().await;
            let Some(playlist) = &state.playlist else {
                return Err(SetlistError::NotReady);
            };
            remove_member(playlist, song_id)
        };

        self.submit(guard, request).await
    }

    /// Submit a whole-resource replacement and adopt the server's result.
    ///
    /// Refused with `SubmissionInProgress` while another replacement for the
    /// same playlist is outstanding. On failure the local snapshot is kept.
    pub async fn apply(&self, request: MembershipUpdateRequest) -> Result<Playlist> {
        if request.id != self.playlist_id {
            return Err(SetlistError::invalid_input(format!(
                "request targets playlist {}, session is for {}",
                request.id, self.playlist_id
            )));
        }

        let guard = self.acquire()?;
        self.submit(guard, request).await
    }

    /// Claim the in-flight slot for this playlist.
    fn acquire(&self) -> Result<InFlightGuard> {
        self.in_flight
            .try_acquire(self.playlist_id)
            .ok_or(SetlistError::SubmissionInProgress(self.playlist_id))
    }

    /// Send `request` while holding `_guard`; the slot is freed on return.
    async fn submit(
        &self,
        _guard: InFlightGuard,
        request: MembershipUpdateRequest,
    ) -> Result<Playlist> {
        debug!(
            playlist_id = %request.id,
            members = request.song_ids.len(),
            "Submitting membership change"
        );

        let updated = match self.backend.replace_playlist(&request).await {
            Ok(updated) if updated.id == self.playlist_id => updated,
            Ok(other) => {
                warn!(
                    playlist_id = %request.id,
                    returned = %other.id,
                    "Server answered with a different playlist"
                );
                return Err(SetlistError::request_failed(format!(
                    "server returned playlist {} for an update of playlist {}",
                    other.id, self.playlist_id
                )));
            }
            Err(e) => {
                warn!(playlist_id = %request.id, error = %e, "Membership change failed");
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        state.playlist = Some(updated.clone());
        state.refresh_complement();

        info!(
            playlist_id = %updated.id,
            members = updated.songs.len(),
            "Playlist membership updated"
        );
        Ok(updated)
    }
}
