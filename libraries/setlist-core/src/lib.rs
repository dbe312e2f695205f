//! Setlist Core
//!
//! Platform-agnostic domain types, error handling, and playlist membership
//! reconciliation for the Setlist catalog client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `MembershipUpdateRequest`, `Credential`
//! - **Backend Trait**: `CatalogBackend`, the three remote calls the playlist
//!   detail session depends on
//! - **Reconciliation**: `membership` (pure add/remove/complement) and
//!   `detail` (the Loading / Ready / Submitting session)
//! - **Error Handling**: Unified `SetlistError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use setlist_core::membership::{add_member, complement};
//! use setlist_core::types::{Playlist, PlaylistId, Song, SongId};
//!
//! let catalog = vec![
//!     Song::with_id(SongId::new(1), "Intro"),
//!     Song::with_id(SongId::new(2), "Outro"),
//! ];
//! let playlist = Playlist::new(PlaylistId::new(7), "Warmup")
//!     .with_songs(vec![catalog[0].clone()]);
//!
//! assert_eq!(complement(&catalog, &playlist).len(), 1);
//!
//! let request = add_member(&playlist, &catalog, SongId::new(2)).unwrap();
//! assert_eq!(request.song_ids.len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod detail;
pub mod error;
pub mod membership;
pub mod single_flight;
pub mod traits;
pub mod types;

pub use detail::{DetailPhase, PlaylistDetail};
pub use error::{Result, SetlistError};
pub use single_flight::{InFlightGuard, SingleFlight};
pub use traits::CatalogBackend;

pub use types::{
    Credential, Credentials, MembershipUpdateRequest, NewPlaylist, Playlist, PlaylistId, Song,
    SongId,
};
