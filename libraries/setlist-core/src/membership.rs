//! Playlist membership reconciliation.
//!
//! The backend has no "add member" / "remove member" endpoint. Every change is
//! expressed as a full replacement computed against the last fetched snapshot:
//! `members ∪ {song}` to add, `members − {song}` to remove.

use crate::error::{Result, SetlistError};
use crate::types::{MembershipUpdateRequest, Playlist, Song, SongId};
use std::collections::BTreeSet;

/// Build the replacement that adds `song_id` to `snapshot`.
///
/// Fails without building anything if the song is already a member or is not
/// part of `catalog`.
pub fn add_member(
    snapshot: &Playlist,
    catalog: &[Song],
    song_id: SongId,
) -> Result<MembershipUpdateRequest> {
    let mut members = snapshot.member_ids();
    if members.contains(&song_id) {
        return Err(SetlistError::AlreadyMember {
            playlist: snapshot.id,
            song: song_id,
        });
    }
    if !catalog.iter().any(|song| song.id == Some(song_id)) {
        return Err(SetlistError::UnknownSong(song_id));
    }

    members.insert(song_id);
    Ok(MembershipUpdateRequest::from_snapshot(snapshot, members))
}

/// Build the replacement that removes `song_id` from `snapshot`.
///
/// Removing a song that is not a member yields the unchanged member set.
pub fn remove_member(snapshot: &Playlist, song_id: SongId) -> MembershipUpdateRequest {
    let mut members = snapshot.member_ids();
    members.remove(&song_id);
    MembershipUpdateRequest::from_snapshot(snapshot, members)
}

/// Catalog songs that are not in `snapshot`, in catalog order.
///
/// Songs without a server id are never candidates.
pub fn complement(catalog: &[Song], snapshot: &Playlist) -> Vec<Song> {
    let members: BTreeSet<SongId> = snapshot.member_ids();
    catalog
        .iter()
        .filter(|song| song.id.is_some_and(|id| !members.contains(&id)))
        .cloned()
        .collect()
}
