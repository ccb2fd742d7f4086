//! Track and now-playing types.
//!
//! A [`Track`] is mostly opaque to the engine: besides the two
//! engine-assigned fields (`id`, `url`) it carries whatever metadata the
//! client supplied, modeled as an open JSON object rather than a fixed
//! struct so the engine never needs to know what a "track" actually is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a DJ's client sends back in reply to a `requestTrack` call: whatever
/// track metadata it wants to advertise, plus an optional `data` field
/// carrying the payload bytes (or a pointer to them). The engine assigns
/// `id`/`url` itself and never interprets `data` beyond storing/stripping it.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackDraft {
    /// Transient payload, stored in the Track Registry and never echoed
    /// back to peers.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Arbitrary client-supplied metadata (title, artist, duration, ...).
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A track known to the engine. `data` is only populated on the copy held
/// in the [`crate::registry::TrackRegistry`]; every peer-visible copy has it
/// stripped via [`Track::without_data`].
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    /// Server-assigned track id.
    pub id: Uuid,
    /// Server-assigned URL of the form `<http_url>tracks/<id>`.
    pub url: String,
    /// Transient payload. Present only in the registry's copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Arbitrary client-supplied metadata.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Track {
    /// Build a server-assigned track from a DJ's `requestTrack` reply.
    #[must_use]
    pub fn from_draft(draft: TrackDraft, id: Uuid, url: String) -> Self {
        Self {
            id,
            url,
            data: draft.data,
            metadata: draft.metadata,
        }
    }

    /// A clone with the transient payload stripped, safe to broadcast.
    #[must_use]
    pub fn without_data(&self) -> Self {
        Self {
            id: self.id,
            url: self.url.clone(),
            data: None,
            metadata: self.metadata.clone(),
        }
    }
}

/// The currently playing track: the track itself (without `data`), the
/// votes cast against it, and when it started.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    /// The track being played, with its payload stripped.
    pub track: Track,
    /// Peer id -> vote. `true` is a downvote, `false` an upvote.
    pub votes: HashMap<String, bool>,
    /// Unix timestamp (seconds) this track is considered to have started.
    /// Set to `now + 5` at publish time to give clients a moment to buffer.
    pub started_at: i64,
}

impl NowPlaying {
    /// Publish a freshly spun track with no votes yet, starting 5s from now.
    #[must_use]
    pub fn new(track: Track, now: i64) -> Self {
        Self {
            track,
            votes: HashMap::new(),
            started_at: now + 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_data_strips_payload_but_keeps_metadata() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("title".into(), "Song".into());

        let track = Track {
            id: Uuid::nil(),
            url: "https://x.invalid/tracks/0".into(),
            data: Some(serde_json::json!({"bytes": "..."})),
            metadata,
        };

        let stripped = track.without_data();
        assert!(stripped.data.is_none());
        assert_eq!(stripped.metadata.get("title").unwrap(), "Song");

        let json = serde_json::to_value(&stripped).unwrap();
        assert!(json.get("data").is_none());
    }
}
