//! Route-level access control.

use crate::session::SessionStore;
use setlist_core::{PlaylistId, SongId};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Songs,
    NewSong,
    EditSong(SongId),
    Playlists,
    NewPlaylist,
    PlaylistDetail(PlaylistId),
}

impl Route {
    /// Where the empty path leads.
    pub const DEFAULT: Route = Route::Playlists;

    /// Everything except the login screen requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Songs => f.write_str("/songs"),
            Route::NewSong => f.write_str("/songs/new"),
            Route::EditSong(id) => write!(f, "/songs/edit/{}", id),
            Route::Playlists => f.write_str("/playlists"),
            Route::NewPlaylist => f.write_str("/playlists/new"),
            Route::PlaylistDetail(id) => write!(f, "/playlists/detail/{}", id),
        }
    }
}

/// Path that matches no route.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(path.to_string());
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::DEFAULT),
            ["login"] => Ok(Route::Login),
            ["songs"] => Ok(Route::Songs),
            ["songs", "new"] => Ok(Route::NewSong),
            ["songs", "edit", id] => id.parse().map(Route::EditSong).map_err(|_| unknown()),
            ["playlists"] => Ok(Route::Playlists),
            ["playlists", "new"] => Ok(Route::NewPlaylist),
            ["playlists", "detail", id] => {
                id.parse().map(Route::PlaylistDetail).map_err(|_| unknown())
            }
            _ => Err(unknown()),
        }
    }
}

/// Performs navigation on behalf of the gate.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Decides whether a navigation may proceed.
///
/// Holds no mutable state, so it can be evaluated repeatedly and from several
/// tasks at once. The answer always reflects the session at call time.
#[derive(Clone)]
pub struct AccessGate {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AccessGate {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
        }
    }

    /// Permit or deny entering `route`.
    ///
    /// A denial redirects to the login route exactly once and returns `false`;
    /// the caller must not continue with the protected action.
    pub fn can_activate(&self, route: Route) -> bool {
        if !route.is_protected() || self.session.is_authenticated() {
            return true;
        }

        debug!(route = %route, "Not authenticated, redirecting to login");
        self.navigator.navigate(Route::Login);
        false
    }
}
