//! Server — room directory, peer directory, and track registry owner.
//!
//! Grounded on the teacher's `voice::sfu::SfuServer`: a `DashMap` of rooms
//! behind an `Arc`, a factory method, and a `cleanup_room_if_empty`-style
//! removal path (generalized here to the spec's unconditional 45s-timer
//! removal, §4.4). The server is the one place peer and room directories
//! are mutated outside of a room's own actor loop — both directories are
//! lock-free concurrent maps, so no single mutex serializes unrelated
//! rooms behind each other.

pub mod error;

pub use error::{ServerError, ServerResult};

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use uuid::Uuid;

use crate::config::Config;
use crate::peer::PeerHandle;
use crate::registry::TrackRegistry;
use crate::room::{self, RoomHandle, RoomSummary};

/// The directory of rooms and connected peers, the room factory, the
/// global "rooms changed" broadcaster, and holder of the [`TrackRegistry`].
pub struct Server {
    config: Config,
    registry: TrackRegistry,
    rooms: DashMap<Uuid, RoomHandle>,
    /// Insertion order, so `fetchRooms` returns a stable, ordered list —
    /// `DashMap` iteration order is unspecified.
    room_order: Mutex<Vec<Uuid>>,
    peers: DashMap<String, PeerHandle>,
}

impl Server {
    #[must_use]
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry: TrackRegistry::new(),
            rooms: DashMap::new(),
            room_order: Mutex::new(Vec::new()),
            peers: DashMap::new(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.server_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.server_name
    }

    #[must_use]
    pub fn ws_url(&self) -> &str {
        &self.config.ws_url
    }

    #[must_use]
    pub fn http_url(&self) -> &str {
        &self.config.http_url
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// `createRoom({name})`: mint a room whose adminId is the calling
    /// peer's id.
    pub fn create_room(
        self: &Arc<Self>,
        name: String,
        admin_id: String,
    ) -> ServerResult<RoomHandle> {
        if name.trim().is_empty() {
            return Err(ServerError::BlankRoomName);
        }
        let id = Uuid::now_v7();
        let handle = room::spawn(self.clone(), id, name, admin_id);
        self.rooms.insert(id, handle.clone());
        self.room_order.lock().unwrap().push(id);
        Ok(handle)
    }

    #[must_use]
    pub fn get_room(&self, id: Uuid) -> Option<RoomHandle> {
        self.rooms.get(&id).map(|entry| entry.clone())
    }

    /// `removeRoom`: detach a room from the directory. The room's own
    /// actor evicts its remaining tracks from the registry before calling
    /// this (§4.2 garbage discipline, case (c)).
    pub fn remove_room(&self, id: Uuid) {
        self.rooms.remove(&id);
        self.room_order.lock().unwrap().retain(|r| *r != id);
    }

    /// Abridged summaries of every room, in creation order.
    #[must_use]
    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.room_order
            .lock()
            .unwrap()
            .iter()
            .filter_map(|id| self.rooms.get(id).map(|entry| entry.summary()))
            .collect()
    }

    /// `broadcastRooms()`: push the abridged rooms list to every connected
    /// peer. Reads each room's summary off its `watch` channel rather than
    /// asking the room's task directly, so calling this from inside a
    /// room's own command handler never deadlocks against itself.
    pub fn broadcast_rooms(&self) {
        let payload = serde_json::json!({ "rooms": self.room_summaries() });
        for entry in self.peers.iter() {
            entry.value().push("setRooms", payload.clone());
        }
    }

    pub fn register_peer(&self, peer_id: String, handle: PeerHandle) {
        self.peers.insert(peer_id, handle);
    }

    pub fn remove_peer(&self, peer_id: &str) {
        self.peers.remove(peer_id);
    }

    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_room_rejects_blank_name() {
        let server = Server::new(Config::default_for_test());
        let err = server.create_room(String::new(), "admin".into()).unwrap_err();
        assert_eq!(err, ServerError::BlankRoomName);
    }

    #[test]
    fn room_summaries_preserve_creation_order() {
        let server = Server::new(Config::default_for_test());
        let a = server.create_room("a".into(), "admin".into()).unwrap();
        let b = server.create_room("b".into(), "admin".into()).unwrap();
        let summaries = server.room_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, a.id);
        assert_eq!(summaries[1].id, b.id);
    }

    #[test]
    fn remove_room_drops_it_from_the_directory() {
        let server = Server::new(Config::default_for_test());
        let room = server.create_room("a".into(), "admin".into()).unwrap();
        server.remove_room(room.id);
        assert!(server.get_room(room.id).is_none());
        assert_eq!(server.room_summaries().len(), 0);
    }
}
