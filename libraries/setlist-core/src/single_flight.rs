//! At most one outstanding membership change per playlist.

use crate::types::PlaylistId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Registry of playlists with a replacement in flight.
///
/// Cloning shares the registry, so several detail sessions for the same
/// playlist are serialized against each other as well.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    in_flight: Arc<Mutex<HashSet<PlaylistId>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as in flight.
    ///
    /// Returns `None` if a previous guard for `id` is still alive. The mark is
    /// released when the returned guard is dropped, whatever the outcome.
    pub fn try_acquire(&self, id: PlaylistId) -> Option<InFlightGuard> {
        if !self.lock().insert(id) {
            debug!(playlist_id = %id, "Membership change already in flight");
            return None;
        }

        Some(InFlightGuard {
            id,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self, id: PlaylistId) -> bool {
        self.lock().contains(&id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<PlaylistId>> {
        // The set stays consistent even if a holder panicked.
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the in-flight mark for one playlist on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    id: PlaylistId,
    in_flight: Arc<Mutex<HashSet<PlaylistId>>>,
}

impl InFlightGuard {
    pub fn playlist_id(&self) -> PlaylistId {
        self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_for_same_playlist_is_refused() {
        let flights = SingleFlight::new();
        let id = PlaylistId::new(7);

        let guard = flights.try_acquire(id);
        assert!(guard.is_some());
        assert!(flights.try_acquire(id).is_none());
        assert!(flights.is_in_flight(id));
    }

    #[test]
    fn other_playlists_are_independent() {
        let flights = SingleFlight::new();

        let _seven = flights.try_acquire(PlaylistId::new(7)).unwrap();
        assert!(flights.try_acquire(PlaylistId::new(8)).is_some());
    }

    #[test]
    fn dropping_guard_releases_mark() {
        let flights = SingleFlight::new();
        let id = PlaylistId::new(7);

        drop(flights.try_acquire(id).unwrap());

        assert!(!flights.is_in_flight(id));
        assert!(flights.try_acquire(id).is_some());
    }

    #[test]
    fn clones_share_the_registry() {
        let flights = SingleFlight::new();
        let shared = flights.clone();

        let _guard = flights.try_acquire(PlaylistId::new(1)).unwrap();
        assert!(shared.try_acquire(PlaylistId::new(1)).is_none());
    }
}
