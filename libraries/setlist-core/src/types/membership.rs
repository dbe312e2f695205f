//! Whole-resource membership update payload

use super::ids::{PlaylistId, SongId};
use super::playlist::Playlist;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Full replacement body for a playlist whose membership changes.
///
/// Built fresh for every change from the last fetched snapshot; descriptive
/// fields are carried over unchanged so the replacement only alters members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipUpdateRequest {
    pub id: PlaylistId,
    pub name: String,
    pub description: Option<String>,

    /// Target membership after the change
    pub song_ids: BTreeSet<SongId>,
}

impl MembershipUpdateRequest {
    pub fn from_snapshot(snapshot: &Playlist, song_ids: BTreeSet<SongId>) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            description: snapshot.description.clone(),
            song_ids,
        }
    }

    pub fn contains(&self, song_id: SongId) -> bool {
        self.song_ids.contains(&song_id)
    }
}
