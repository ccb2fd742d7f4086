//! Room — the DJ rotation state machine.
//!
//! This is the heart of the engine: rotation, track lifecycle, the
//! vote/skip protocol, the peer roster, and broadcast fan-out. Grounded on
//! the teacher's `voice::sfu::Room`/`SfuServer` split — a room owns a
//! roster behind interior state and exposes `broadcast`/`broadcast_except`
//! that clone sender handles out before doing I/O — generalized into the
//! single-threaded-per-room actor the concurrency model requires: a
//! [`Room`] is a handle to an [`RoomActor`] running on its own task,
//! processing one [`RoomCommand`] at a time from an unbounded channel.
//! `spin_dj`/`fetch_on_deck` are the only points that actor suspends,
//! awaiting a `requestTrack` reply from a peer; every other command
//! completes synchronously before the next is dequeued, which is what
//! gives the invariants in the data model their single-writer guarantee.

mod error;
mod types;

pub use error::{RoomError, RoomResult};
pub use types::{RoomSnapshot, RoomSummary};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::peer::PeerHandle;
use crate::server::Server;
use crate::track::{NowPlaying, Track};

/// Skip timer duration (§5): how long a skip warning stands before it
/// resolves into an actual skip.
const SKIP_TIMER: Duration = Duration::from_secs(5);

/// Empty-room removal timer (§4.4): how long a room with no peers survives
/// before the server reclaims it.
const REMOVAL_TIMER: Duration = Duration::from_secs(45);

/// Maximum DJs a room's rotation may hold at once (§3 invariant).
const MAX_DJS: usize = 5;

/// Commands a [`RoomHandle`] sends into its actor's queue. Every variant
/// that needs an answer carries its own `oneshot` reply channel — there is
/// no shared "pending requests" table, since each command is self-contained.
enum RoomCommand {
    AddPeer {
        peer_id: String,
        handle: PeerHandle,
        respond: oneshot::Sender<RoomSnapshot>,
    },
    RemovePeer {
        peer_id: String,
        respond: oneshot::Sender<()>,
    },
    AddDj {
        peer_id: String,
        respond: oneshot::Sender<RoomResult<()>>,
    },
    RemoveDj {
        peer_id: String,
        respond: oneshot::Sender<RoomResult<()>>,
    },
    SkipTurn {
        peer_id: String,
        respond: oneshot::Sender<RoomResult<()>>,
    },
    TrackEnded {
        peer_id: String,
        respond: oneshot::Sender<RoomResult<()>>,
    },
    UpdatedQueue {
        peer_id: String,
    },
    SendChat {
        peer_id: String,
        message: String,
    },
    BroadcastProfile {
        peer_id: String,
        profile: serde_json::Value,
    },
    SetVote {
        peer_id: String,
        downvote: bool,
        respond: oneshot::Sender<RoomResult<()>>,
    },
    Snapshot {
        respond: oneshot::Sender<RoomSnapshot>,
    },
    SkipTimerFired,
    RemovalTimerFired,
}

/// A cheap, cloneable reference to a running room. Talking to the room
/// means sending a [`RoomCommand`] and (for most operations) awaiting its
/// `oneshot` reply; the current summary is instead read off a `watch`
/// channel the actor keeps fresh, so [`Server::room_summaries`] never has
/// to round-trip into every room's task (doing so from inside a room's own
/// `broadcast_rooms` call would deadlock the caller against itself).
#[derive(Clone)]
pub struct RoomHandle {
    pub id: Uuid,
    pub name: String,
    pub admin_id: String,
    tx: mpsc::UnboundedSender<RoomCommand>,
    summary_rx: watch::Receiver<RoomSummary>,
}

impl RoomHandle {
    /// The room's current abridged summary. Never round-trips into the
    /// room's task; reads the latest value the actor published.
    #[must_use]
    pub fn summary(&self) -> RoomSummary {
        self.summary_rx.borrow().clone()
    }

    pub async fn add_peer(&self, peer_id: String, handle: PeerHandle) -> RoomSnapshot {
        let (tx, rx) = oneshot::channel();
        let _ = self.tx.send(RoomCommand::AddPeer {
            peer_id,
            handle,
            respond: tx,
        });
        rx.await
            .unwrap_or_else(|_| self.empty_snapshot_fallback())
    }

    pub async fn remove_peer(&self, peer_id: String) {
        let (tx, rx) = oneshot::channel();
        let _ = self.tx.send(RoomCommand::RemovePeer {
            peer_id,
            respond: tx,
        });
        let _ = rx.await;
    }

    pub async fn add_dj(&self, peer_id: String) -> RoomResult<()> {
        self.round_trip(|respond| RoomCommand::AddDj { peer_id, respond })
            .await
    }

    pub async fn remove_dj(&self, peer_id: String) -> RoomResult<()> {
        self.round_trip(|respond| RoomCommand::RemoveDj { peer_id, respond })
            .await
    }

    pub async fn skip_turn(&self, peer_id: String) -> RoomResult<()> {
        self.round_trip(|respond| RoomCommand::SkipTurn { peer_id, respond })
            .await
    }

    pub async fn track_ended(&self, peer_id: String) -> RoomResult<()> {
        self.round_trip(|respond| RoomCommand::TrackEnded { peer_id, respond })
            .await
    }

    pub fn updated_queue(&self, peer_id: String) {
        let _ = self.tx.send(RoomCommand::UpdatedQueue { peer_id });
    }

    pub fn send_chat(&self, peer_id: String, message: String) {
        let _ = self.tx.send(RoomCommand::SendChat { peer_id, message });
    }

    pub fn broadcast_profile(&self, peer_id: String, profile: serde_json::Value) {
        let _ = self
            .tx
            .send(RoomCommand::BroadcastProfile { peer_id, profile });
    }

    pub async fn set_vote(&self, peer_id: String, downvote: bool) -> RoomResult<()> {
        self.round_trip(|respond| RoomCommand::SetVote {
            peer_id,
            downvote,
            respond,
        })
        .await
    }

    pub async fn snapshot(&self) -> RoomSnapshot {
        let (tx, rx) = oneshot::channel();
        let _ = self.tx.send(RoomCommand::Snapshot { respond: tx });
        rx.await.unwrap_or_else(|_| self.empty_snapshot_fallback())
    }

    async fn round_trip<F>(&self, build: F) -> RoomResult<()>
    where
        F: FnOnce(oneshot::Sender<RoomResult<()>>) -> RoomCommand,
    {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(build(tx)).is_err() {
            return Err(RoomError::RoomGone);
        }
        rx.await.unwrap_or(Err(RoomError::RoomGone))
    }

    fn empty_snapshot_fallback(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id,
            name: self.name.clone(),
            admin_id: self.admin_id.clone(),
            peers: Vec::new(),
            djs: Vec::new(),
            active_dj: None,
            now_playing: None,
            on_deck: None,
        }
    }
}

/// Spawn a new room actor, returning a handle to it.
pub fn spawn(server: Arc<Server>, id: Uuid, name: String, admin_id: String) -> RoomHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let (summary_tx, summary_rx) = watch::channel(RoomSummary::empty(
        id,
        name.clone(),
        admin_id.clone(),
    ));

    let actor = RoomActor {
        id,
        name: name.clone(),
        admin_id: admin_id.clone(),
        admin: Some(admin_id.clone()),
        peer_order: Vec::new(),
        peers_by_id: HashMap::new(),
        djs: Vec::new(),
        active_dj: None,
        now_playing: None,
        on_deck: None,
        skip_warning: false,
        skip_timer: None,
        removal_timer: None,
        server,
        summary_tx,
        self_tx: tx.clone(),
        rx,
    };
    tokio::spawn(actor.run());

    RoomHandle {
        id,
        name,
        admin_id,
        tx,
        summary_rx,
    }
}

struct RoomActor {
    id: Uuid,
    name: String,
    admin_id: String,
    admin: Option<String>,
    peer_order: Vec<String>,
    peers_by_id: HashMap<String, PeerHandle>,
    djs: Vec<String>,
    active_dj: Option<String>,
    now_playing: Option<NowPlaying>,
    on_deck: Option<Track>,
    skip_warning: bool,
    skip_timer: Option<JoinHandle<()>>,
    removal_timer: Option<JoinHandle<()>>,
    server: Arc<Server>,
    summary_tx: watch::Sender<RoomSummary>,
    self_tx: mpsc::UnboundedSender<RoomCommand>,
    rx: mpsc::UnboundedReceiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        while let Some(cmd) = self.rx.recv().await {
            match cmd {
                RoomCommand::AddPeer {
                    peer_id,
                    handle,
                    respond,
                } => {
                    self.add_peer(peer_id, handle).await;
                    let _ = respond.send(self.snapshot());
                }
                RoomCommand::RemovePeer { peer_id, respond } => {
                    self.remove_peer(&peer_id).await;
                    let _ = respond.send(());
                }
                RoomCommand::AddDj { peer_id, respond } => {
                    let result = self.add_dj(&peer_id).await;
                    let _ = respond.send(result);
                }
                RoomCommand::RemoveDj { peer_id, respond } => {
                    let result = self.remove_dj(&peer_id).await;
                    let _ = respond.send(result);
                }
                RoomCommand::SkipTurn { peer_id, respond } => {
                    let result = self.skip_turn(&peer_id).await;
                    let _ = respond.send(result);
                }
                RoomCommand::TrackEnded { peer_id, respond } => {
                    let result = self.track_ended(&peer_id).await;
                    let _ = respond.send(result);
                }
                RoomCommand::UpdatedQueue { peer_id } => {
                    self.updated_queue(&peer_id).await;
                }
                RoomCommand::SendChat { peer_id, message } => {
                    self.send_chat(&peer_id, message);
                }
                RoomCommand::BroadcastProfile { peer_id, profile } => {
                    self.broadcast_profile(&peer_id, profile);
                }
                RoomCommand::SetVote {
                    peer_id,
                    downvote,
                    respond,
                } => {
                    let result = self.set_vote(&peer_id, downvote);
                    let _ = respond.send(result);
                }
                RoomCommand::Snapshot { respond } => {
                    let _ = respond.send(self.snapshot());
                }
                RoomCommand::SkipTimerFired => self.on_skip_timer_fired().await,
                RoomCommand::RemovalTimerFired => {
                    self.on_removal_timer_fired();
                    break;
                }
            }
        }
        debug!(room_id = %self.id, "room actor shut down");
    }

    // ---- rotation -----------------------------------------------------

    /// `nextDj()`: null if empty, `djs[0]` if nobody's playing, otherwise
    /// the DJ one slot after `active_dj` in rotation order.
    fn next_dj(&self) -> Option<String> {
        if self.djs.is_empty() {
            return None;
        }
        match &self.active_dj {
            None => Some(self.djs[0].clone()),
            Some(active) => match self.djs.iter().position(|d| d == active) {
                Some(i) => Some(self.djs[(i + 1) % self.djs.len()].clone()),
                None => Some(self.djs[0].clone()),
            },
        }
    }

    fn set_active_dj(&mut self, dj: Option<String>) {
        self.active_dj = dj.clone();
        self.broadcast("setActiveDj", json!({ "djId": dj }));
    }

    /// Request a track from `peer_id`, mint its id/url, and register it
    /// with the server's track registry. Returns `None` if the DJ never
    /// replied (e.g. disconnected mid-request) — callers treat that as "no
    /// track available", per §7's acknowledged non-response gap.
    async fn request_and_register(&self, peer_id: &str) -> Option<Track> {
        let handle = self.peers_by_id.get(peer_id)?.clone();
        let draft = handle.request_track().await?;
        let id = Uuid::now_v7();
        let url = format!("{}tracks/{id}", self.server.http_url());
        let track = Track::from_draft(draft, id, url);
        self.server.registry().put(track.clone());
        Some(track)
    }

    /// `spinDj`: advance rotation and publish a track.
    async fn spin_dj(&mut self) {
        let dj = self.next_dj();
        self.spin_dj_to(dj).await;
    }

    /// The body of `spinDj`, parameterized on the DJ to spin to rather than
    /// always recomputing it via `next_dj()`. `removeDj`'s disconnect path
    /// needs this: by the time it calls in, the departing DJ is already
    /// spliced out of `djs`, so `next_dj()` can no longer look up their
    /// position to find their successor — the successor has to be
    /// precomputed while the departing DJ was still in the rotation and
    /// handed in directly (see `remove_dj`).
    async fn spin_dj_to(&mut self, dj: Option<String>) {
        self.set_active_dj(dj.clone());

        let Some(dj_id) = dj else {
            self.on_deck = None;
            self.broadcast("setOnDeck", json!({ "track": null }));
            return;
        };

        let track = if let Some(track) = self.on_deck.take() {
            track
        } else {
            match self.request_and_register(&dj_id).await {
                Some(track) => track.without_data(),
                None => return,
            }
        };

        let now_playing = NowPlaying::new(track, now_unix());
        self.now_playing = Some(now_playing.clone());
        self.broadcast("playTrack", serde_json::to_value(&now_playing).unwrap());
        self.publish_and_broadcast_rooms();

        if let Some(handle) = self.peers_by_id.get(&dj_id) {
            handle.push("cycleSelectedQueue", json!({}));
        }

        self.fetch_on_deck().await;
    }

    /// `fetchOnDeck`: prefetch the next DJ's track without blocking
    /// playback. The post-await re-check of `next_dj()` against the DJ we
    /// actually requested from is the race guard §5 mandates.
    async fn fetch_on_deck(&mut self) {
        if let Some(old) = self.on_deck.take() {
            self.server.registry().remove(old.id);
        }

        let Some(target) = self.next_dj() else {
            return;
        };

        let Some(track) = self.request_and_register(&target).await else {
            return;
        };

        if self.next_dj().as_deref() != Some(target.as_str()) {
            self.server.registry().remove(track.id);
            return;
        }

        let visible = track.without_data();
        self.on_deck = Some(visible.clone());
        self.broadcast("setOnDeck", json!({ "track": visible }));
    }

    /// Evict the current track, cancel any pending skip timer, and
    /// broadcast the stop. Deliberately broadcasts `setActiveDj{djId:null}`
    /// as a bare notification rather than routing through `set_active_dj` —
    /// `self.active_dj` is left as whoever just finished so the `spinDj`
    /// that follows can still find their position in `djs` and rotate to
    /// the true successor, instead of every track end resetting the room
    /// back to `djs[0]`.
    fn stop_current_track(&mut self) -> bool {
        let Some(now_playing) = self.now_playing.take() else {
            return false;
        };
        self.server.registry().remove(now_playing.track.id);

        if let Some(handle) = self.skip_timer.take() {
            handle.abort();
        }
        self.skip_warning = false;

        self.broadcast("stopTrack", json!({}));
        self.broadcast("setActiveDj", json!({ "djId": null }));
        self.publish_and_broadcast_rooms();
        true
    }

    /// `endTrack`: terminate the current track and advance rotation.
    async fn end_track(&mut self) -> bool {
        if !self.stop_current_track() {
            return false;
        }
        self.spin_dj().await;
        true
    }

    // ---- dj roster ------------------------------------------------------

    /// `addDj`: append to rotation if room, start playback on the first DJ,
    /// prefetch if the new DJ lands in the on-deck slot.
    async fn add_dj(&mut self, peer_id: &str) -> RoomResult<()> {
        if self.djs.iter().any(|d| d == peer_id) {
            return Err(RoomError::AlreadyDj);
        }
        if self.djs.len() >= MAX_DJS {
            return Err(RoomError::TooManyDjs);
        }

        self.djs.push(peer_id.to_string());
        self.broadcast("setDjs", json!({ "djs": self.djs }));

        if self.djs.len() == 1 {
            self.spin_dj().await;
        } else if self.next_dj().as_deref() == Some(peer_id) {
            self.fetch_on_deck().await;
        }
        Ok(())
    }

    /// `removeDj`: splice out of rotation, ending the track if the leaver
    /// was playing, clearing on-deck if rotation is now empty, or
    /// re-prefetching if the leaver was the on-deck provider.
    async fn remove_dj(&mut self, peer_id: &str) -> RoomResult<()> {
        if !self.djs.iter().any(|d| d == peer_id) {
            return Err(RoomError::NotADj);
        }

        // Computed while `peer_id` is still in `djs` (and, if they're the
        // active DJ, still `active_dj`), so this is exactly `nextDj()`'s
        // "who comes after the active DJ" branch — the only point at which
        // that lookup can still find `peer_id`'s position.
        let next_before_removal = self.next_dj();
        let refresh_on_deck = next_before_removal.as_deref() == Some(peer_id);
        let was_active = self.active_dj.as_deref() == Some(peer_id);

        self.djs.retain(|d| d != peer_id);
        self.broadcast("setDjs", json!({ "djs": self.djs }));

        if was_active {
            let successor = if self.djs.is_empty() { None } else { next_before_removal };
            self.stop_current_track();
            self.spin_dj_to(successor).await;
            return Ok(());
        }

        if self.djs.is_empty() {
            if let Some(old) = self.on_deck.take() {
                self.server.registry().remove(old.id);
            }
            self.broadcast("setOnDeck", json!({ "track": null }));
        } else if refresh_on_deck {
            self.fetch_on_deck().await;
        }
        Ok(())
    }

    async fn skip_turn(&mut self, peer_id: &str) -> RoomResult<()> {
        if self.active_dj.as_deref() != Some(peer_id) {
            return Err(RoomError::NotActiveDj);
        }
        self.end_track().await;
        Ok(())
    }

    async fn track_ended(&mut self, peer_id: &str) -> RoomResult<()> {
        if self.active_dj.as_deref() != Some(peer_id) {
            return Err(RoomError::NotActiveDj);
        }
        self.end_track().await;
        Ok(())
    }

    /// `updatedQueue`: re-fetch on-deck from `peer_id`, but only if they
    /// are actually the next DJ. Silently a no-op otherwise (design note
    /// #5 — this keeps the call idempotent for a non-next-DJ caller).
    async fn updated_queue(&mut self, peer_id: &str) {
        if self.next_dj().as_deref() == Some(peer_id) {
            self.fetch_on_deck().await;
        }
    }

    // ---- vote / skip protocol -------------------------------------------

    fn set_vote(&mut self, peer_id: &str, downvote: bool) -> RoomResult<()> {
        let Some(now_playing) = self.now_playing.as_mut() else {
            return Err(RoomError::NoSongPlaying);
        };
        now_playing.votes.insert(peer_id.to_string(), downvote);
        let votes = now_playing.votes.clone();
        self.broadcast("setVotes", json!({ "votes": votes }));

        let downs = votes.values().filter(|v| **v).count();
        let ups = votes.values().filter(|v| !**v).count();
        let total_votes = ups + downs;
        let quorum = total_votes as f64 / self.peer_order.len().max(1) as f64;
        let down_perc = if total_votes == 0 {
            0.0
        } else {
            downs as f64 / total_votes as f64
        };
        let should_skip = total_votes > 0 && quorum >= 0.30 && down_perc >= 0.50;

        if !self.skip_warning && should_skip {
            self.skip_warning = true;
            self.broadcast("setSkipWarning", json!({ "value": true }));
            let tx = self.self_tx.clone();
            self.skip_timer = Some(tokio::spawn(async move {
                tokio::time::sleep(SKIP_TIMER).await;
                let _ = tx.send(RoomCommand::SkipTimerFired);
            }));
        } else if self.skip_warning && !should_skip {
            if let Some(handle) = self.skip_timer.take() {
                handle.abort();
            }
            self.skip_warning = false;
            self.broadcast("setSkipWarning", json!({ "value": false }));
        }
        Ok(())
    }

    async fn on_skip_timer_fired(&mut self) {
        self.skip_timer = None;
        self.skip_warning = false;
        self.broadcast("setSkipWarning", json!({ "value": false }));
        self.end_track().await;
    }

    // ---- peer roster ------------------------------------------------------

    /// `addPeer`: join the roster, cancel any pending removal, broadcast
    /// the roster to everyone else, and privately catch the new peer up on
    /// whatever is already playing / queued.
    async fn add_peer(&mut self, peer_id: String, handle: PeerHandle) {
        if let Some(removal) = self.removal_timer.take() {
            removal.abort();
        }

        if !self.peer_order.contains(&peer_id) {
            self.peer_order.push(peer_id.clone());
            self.peers_by_id.insert(peer_id.clone(), handle.clone());
        }

        self.broadcast_except(&peer_id, "setPeers", json!({ "peers": self.peer_order }));
        self.publish_and_broadcast_rooms();

        if let Some(now_playing) = &self.now_playing {
            handle.push("playTrack", serde_json::to_value(now_playing).unwrap());
        }
        if let Some(track) = &self.on_deck {
            handle.push("setOnDeck", json!({ "track": track }));
        }
    }

    /// `removePeer`: splice out, unconditionally run `removeDj` (a no-op if
    /// the peer wasn't one), clear admin if they held it, and schedule
    /// removal if the roster is now empty.
    async fn remove_peer(&mut self, peer_id: &str) {
        self.peer_order.retain(|p| p != peer_id);
        self.peers_by_id.remove(peer_id);

        let _ = self.remove_dj(peer_id).await;

        if self.admin.as_deref() == Some(peer_id) {
            self.admin = None;
        }

        self.broadcast("setPeers", json!({ "peers": self.peer_order }));
        self.publish_and_broadcast_rooms();

        if self.peer_order.is_empty() {
            let tx = self.self_tx.clone();
            self.removal_timer = Some(tokio::spawn(async move {
                tokio::time::sleep(REMOVAL_TIMER).await;
                let _ = tx.send(RoomCommand::RemovalTimerFired);
            }));
        }
    }

    fn on_removal_timer_fired(&mut self) {
        if !self.peer_order.is_empty() {
            // A peer re-entered between the timer firing and this command
            // being dequeued; the timer handle would already have been
            // aborted in that case, but guard anyway since aborts race.
            return;
        }
        if let Some(track) = self.on_deck.take() {
            self.server.registry().remove(track.id);
        }
        if let Some(now_playing) = self.now_playing.take() {
            self.server.registry().remove(now_playing.track.id);
        }
        self.server.remove_room(self.id);
        debug!(room_id = %self.id, "room removed after 45s empty");
    }

    // ---- chat / profile -------------------------------------------------

    fn send_chat(&mut self, peer_id: &str, message: String) {
        let payload = json!({
            "id": Uuid::now_v7().to_string(),
            "message": message,
            "senderId": peer_id,
            "timestamp": now_millis(),
        });
        self.broadcast("newChatMsg", payload);
    }

    fn broadcast_profile(&mut self, peer_id: &str, profile: serde_json::Value) {
        self.broadcast(
            "setPeerProfile",
            json!({ "peerId": peer_id, "profile": profile }),
        );
    }

    // ---- fan-out + snapshots --------------------------------------------

    fn broadcast(&self, name: &str, params: serde_json::Value) {
        for handle in self.peers_by_id.values() {
            handle.push(name, params.clone());
        }
    }

    fn broadcast_except(&self, exclude: &str, name: &str, params: serde_json::Value) {
        for (peer_id, handle) in &self.peers_by_id {
            if peer_id != exclude {
                handle.push(name, params.clone());
            }
        }
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id,
            name: self.name.clone(),
            admin_id: self.admin_id.clone(),
            peers: self.peer_order.clone(),
            djs: self.djs.clone(),
            active_dj: self.active_dj.clone(),
            now_playing: self.now_playing.clone(),
            on_deck: self.on_deck.clone(),
        }
    }

    fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            name: self.name.clone(),
            admin_id: self.admin_id.clone(),
            peer_count: self.peer_order.len(),
            now_playing: self.now_playing.clone(),
        }
    }

    /// Publish the fresh summary to the `watch` channel (cheap, no I/O)
    /// and then ask the server to push it to every connected peer.
    /// Reading `self.server.room_summaries()` back inside that push never
    /// round-trips into this room's own command queue, so there's no
    /// deadlock even though this method runs on that same queue.
    fn publish_and_broadcast_rooms(&self) {
        if self.summary_tx.send(self.summary()).is_err() {
            warn!(room_id = %self.id, "summary watch channel has no receivers");
        }
        self.server.broadcast_rooms();
    }
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
