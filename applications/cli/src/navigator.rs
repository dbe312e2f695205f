//! Navigation for a terminal session.

use setlist_client::{Navigator, Route};
use std::sync::{Mutex, PoisonError};

/// Turns a redirect into a hint on stderr.
///
/// A terminal has no screen to switch to, so the redirect target is recorded
/// and the user is told which command leads there.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent redirect, if any.
    pub fn last_redirect(&self) -> Option<Route> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);

        if route == Route::Login {
            eprintln!("Not logged in. Run `setlist login` first.");
        } else {
            eprintln!("Continue at {}", route);
        }
    }
}
