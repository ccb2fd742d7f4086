//! Track Registry
//!
//! A process-wide, cross-room mapping from track id to full track data
//! (including the transient payload). Rooms add entries on prefetch and
//! remove them on track end, on-deck displacement, or room removal — the
//! registry itself never expires entries on a timer.

use dashmap::DashMap;
use uuid::Uuid;

use crate::track::Track;

/// Process-wide track-id -> track lookup, shared by every [`crate::room::Room`].
#[derive(Debug, Default)]
pub struct TrackRegistry {
    tracks: DashMap<Uuid, Track>,
}

impl TrackRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a track, keyed by its id.
    pub fn put(&self, track: Track) {
        self.tracks.insert(track.id, track);
    }

    /// Look up a track by id.
    #[must_use]
    pub fn get(&self, track_id: Uuid) -> Option<Track> {
        self.tracks.get(&track_id).map(|entry| entry.clone())
    }

    /// Remove a track by id. A no-op if the id isn't present.
    pub fn remove(&self, track_id: Uuid) {
        self.tracks.remove(&track_id);
    }

    /// Number of tracks currently held. Exposed for tests and diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the registry holds no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
