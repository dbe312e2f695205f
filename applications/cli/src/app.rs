//! Commands behind the terminal front-end.
//!
//! Every command names the route it corresponds to and asks the access gate
//! before touching the server; only `login` is reachable without a session.

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use setlist_client::{AccessGate, ApiClient, Navigator, Route, SessionStore, TokenStorage};
use setlist_core::{
    Credentials, NewPlaylist, Playlist, PlaylistDetail, PlaylistId, Song, SongId,
};
use std::sync::Arc;
use tracing::info;

/// Field changes for an existing song; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct SongChanges {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl SongChanges {
    pub fn apply_to(self, song: &mut Song) {
        if let Some(title) = self.title {
            song.title = title;
        }
        if let Some(artist) = self.artist {
            song.artist = artist;
        }
        if let Some(album) = self.album {
            song.album = album;
        }
        if let Some(year) = self.year {
            song.year = year;
        }
        if let Some(genre) = self.genre {
            song.genre = genre;
        }
    }
}

/// Snapshot of the session for `setlist status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub server: String,
    pub authenticated: bool,
    pub storage_available: bool,
}

/// Wiring of session, client and gate for one process.
pub struct App {
    session: Arc<SessionStore>,
    client: Arc<ApiClient>,
    gate: AccessGate,
}

impl App {
    pub fn new(
        config: &CliConfig,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let session = Arc::new(SessionStore::new(&config.client_config(), storage)?);
        let client = Arc::new(ApiClient::new(Arc::clone(&session)));
        let gate = AccessGate::new(Arc::clone(&session), navigator);

        Ok(Self {
            session,
            client,
            gate,
        })
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Ask the gate for `route`; a denial has already redirected to login.
    pub fn enter(&self, route: Route) -> Result<()> {
        if self.gate.can_activate(route) {
            Ok(())
        } else {
            Err(CliError::LoginRequired(route))
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in. Returns whether the session will be remembered.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool> {
        self.enter(Route::Login)?;
        self.client
            .login(&Credentials::new(username, password))
            .await?;

        info!(username = %username, "Logged in");
        Ok(self.session.is_authenticated())
    }

    pub fn logout(&self) -> Result<()> {
        self.client.logout()?;
        Ok(())
    }

    pub fn status(&self) -> Status {
        Status {
            server: self.client.url().to_string(),
            authenticated: self.session.is_authenticated(),
            storage_available: self.session.storage_available(),
        }
    }

    // =========================================================================
    // Songs
    // =========================================================================

    pub async fn songs(&self) -> Result<Vec<Song>> {
        self.enter(Route::Songs)?;
        Ok(self.client.songs().list().await?)
    }

    pub async fn add_song(&self, song: &Song) -> Result<Song> {
        self.enter(Route::NewSong)?;
        Ok(self.client.songs().create(song).await?)
    }

    pub async fn edit_song(&self, id: SongId, changes: SongChanges) -> Result<Song> {
        self.enter(Route::EditSong(id))?;

        let mut song = self.client.songs().get(id).await?;
        changes.apply_to(&mut song);
        Ok(self.client.songs().update(id, &song).await?)
    }

    pub async fn delete_song(&self, id: SongId) -> Result<()> {
        self.enter(Route::Songs)?;
        self.client.songs().delete(id).await?;
        Ok(())
    }

    // =========================================================================
    // Playlists
    // =========================================================================

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        self.enter(Route::Playlists)?;
        Ok(self.client.playlists().list().await?)
    }

    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        self.enter(Route::NewPlaylist)?;
        Ok(self.client.playlists().create(playlist).await?)
    }

    /// Rename or re-describe a playlist, keeping its members.
    pub async fn edit_playlist(
        &self,
        id: PlaylistId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Playlist> {
        self.enter(Route::PlaylistDetail(id))?;

        let snapshot = self.client.playlists().get(id).await?;
        let name = name.unwrap_or_else(|| snapshot.name.clone());
        let description = description.or_else(|| snapshot.description.clone());
        Ok(self
            .client
            .playlists()
            .update_details(&snapshot, name, description)
            .await?)
    }

    pub async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        self.enter(Route::Playlists)?;
        self.client.playlists().delete(id).await?;
        Ok(())
    }

    /// Open the detail view of a playlist with catalog and members loaded.
    pub async fn open_playlist(&self, id: PlaylistId) -> Result<PlaylistDetail<ApiClient>> {
        self.enter(Route::PlaylistDetail(id))?;

        let detail = PlaylistDetail::new(Arc::clone(&self.client), id);
        detail.load().await?;
        Ok(detail)
    }

    pub async fn add_to_playlist(&self, id: PlaylistId, song: SongId) -> Result<Playlist> {
        let detail = self.open_playlist(id).await?;
        Ok(detail.add_song(song).await?)
    }

    pub async fn remove_from_playlist(&self, id: PlaylistId, song: SongId) -> Result<Playlist> {
        let detail = self.open_playlist(id).await?;
        Ok(detail.remove_song(song).await?)
    }
}
