//! Room-shaped wire payloads.
//!
//! Two views of a [`super::Room`]'s state: the full [`RoomSnapshot`] a peer
//! receives on `joinRoom`, and the abridged [`RoomSummary`] every connected
//! peer receives whenever any room's membership or now-playing track
//! changes (`fetchRooms`, and the server-wide rooms broadcast).

use serde::Serialize;
use uuid::Uuid;

use crate::track::{NowPlaying, Track};

/// Full room state, as returned by `joinRoom`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: Uuid,
    pub name: String,
    pub admin_id: String,
    pub peers: Vec<String>,
    pub djs: Vec<String>,
    pub active_dj: Option<String>,
    pub now_playing: Option<NowPlaying>,
    pub on_deck: Option<Track>,
}

/// Abridged room state, as listed by `fetchRooms` and the rooms-changed
/// broadcast: no peer roster, just enough to render a room list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: Uuid,
    pub name: String,
    pub admin_id: String,
    pub peer_count: usize,
    pub now_playing: Option<NowPlaying>,
}

impl RoomSummary {
    /// The summary for a freshly created, empty room.
    #[must_use]
    pub fn empty(id: Uuid, name: String, admin_id: String) -> Self {
        Self {
            id,
            name,
            admin_id,
            peer_count: 0,
            now_playing: None,
        }
    }
}
