mod auth;
mod ids;
mod membership;
mod playlist;
mod song;

pub use auth::{Credential, Credentials};
pub use ids::{PlaylistId, SongId};
pub use membership::MembershipUpdateRequest;
pub use playlist::{NewPlaylist, Playlist};
pub use song::Song;
