//! Setlist Client
//!
//! HTTP client library for the Setlist song/playlist catalog API.
//!
//! # Features
//!
//! - **Session**: login with username/password, token persisted through a
//!   pluggable [`TokenStorage`], logout
//! - **Request authorization**: every request except login carries the
//!   session token as a bearer credential
//! - **Access gate**: per-route permit/deny with redirect to login
//! - **Catalog**: songs and playlists (list, get, create, replace, delete)
//!
//! # Example
//!
//! ```ignore
//! use setlist_client::{ApiClient, ClientConfig, FileTokenStorage, SessionStore};
//! use setlist_core::{Credentials, PlaylistDetail, PlaylistId, SongId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8080");
//!     let session = Arc::new(SessionStore::new(
//!         &config,
//!         Arc::new(FileTokenStorage::new("session.json")),
//!     )?);
//!     let client = Arc::new(ApiClient::new(Arc::clone(&session)));
//!
//!     client.login(&Credentials::new("user", "password")).await?;
//!
//!     let detail = PlaylistDetail::new(Arc::clone(&client), PlaylistId::new(7));
//!     detail.load().await?;
//!     detail.add_song(SongId::new(3)).await?;
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod authorizer;
mod client;
mod error;
mod guard;
mod playlists;
mod session;
mod songs;
mod storage;
mod types;

// Re-export main types
pub use authorizer::RequestAuthorizer;
pub use client::ApiClient;
pub use error::{ClientError, Result};
pub use guard::{AccessGate, Navigator, Route, UnknownRoute};
pub use session::SessionStore;
pub use storage::{
    FileTokenStorage, MemoryTokenStorage, TokenStorage, UnavailableTokenStorage, TOKEN_KEY,
};
pub use types::{ApiError, ClientConfig, LoginResponse, LOGIN_PATH};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use playlists::PlaylistsClient;
pub use songs::SongsClient;
