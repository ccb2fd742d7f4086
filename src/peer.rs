//! Peer — one actor per connected client.
//!
//! Owns the transport session, drives the authentication timeout, exposes
//! the RPC surface from [`crate::rpc`], forwards room-affecting calls to
//! its current [`crate::room::RoomHandle`], and is the sink for
//! server-originated pushes. Grounded on the teacher's `ws::handle_socket`
//! loop — split transport, an outbound command channel, a single
//! `tokio::select!` driving both directions — generalized from "forward
//! Redis pub/sub to a socket" into "drive one peer's full RPC contract".
//!
//! A peer's own mailbox ([`PeerCommand`]) is drained by a task separate
//! from the main dispatch loop (see [`spawn_pusher`]). That split exists
//! for one reason: a room can call back into a peer's own `requestTrack`
//! while that very peer is mid-dispatch on the call that triggered it — the
//! first DJ's `becomeDj` asks the first DJ for a track, the last DJ's
//! `skipTurn` asks the same DJ again next rotation. If the mailbox were
//! drained by the same loop that is awaiting the room's reply, the two
//! would deadlock each other. Splitting them lets the dispatch loop block
//! on the room while the pusher task answers the room on the peer's behalf.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::jwt;
use crate::room::RoomHandle;
use crate::rpc::{self, ClientCall, RpcReply, VoteParams};
use crate::server::Server;
use crate::track::TrackDraft;
use crate::transport::{Inbound, Outbound, PeerSink, PeerSource};

/// How long a freshly connected peer has to `join` or `authenticate`
/// before the transport is closed (§5, resolving open question #1 in
/// favor of the 5s behavior).
const AUTH_TIMER: Duration = Duration::from_secs(5);

/// Messages other actors (chiefly a [`crate::room::Room`]) send to a peer.
enum PeerCommand {
    /// A one-way server-initiated push; no reply expected.
    Push { name: String, params: Value },
    /// Ask the peer's client for a track via `requestTrack`, returning
    /// `None` if the peer disconnects before replying.
    RequestTrack {
        respond: oneshot::Sender<Option<TrackDraft>>,
    },
}

/// A cheap, cloneable handle other actors use to push to or call a peer.
#[derive(Clone)]
pub struct PeerHandle {
    tx: mpsc::UnboundedSender<PeerCommand>,
}

impl PeerHandle {
    /// Fire a one-way push. Silently dropped if the peer has disconnected.
    pub fn push(&self, name: impl Into<String>, params: Value) {
        let _ = self.tx.send(PeerCommand::Push {
            name: name.into(),
            params,
        });
    }

    /// Call the peer's client-side `requestTrack` and await its reply.
    pub async fn request_track(&self) -> Option<TrackDraft> {
        let (respond, rx) = oneshot::channel();
        self.tx.send(PeerCommand::RequestTrack { respond }).ok()?;
        rx.await.ok().flatten()
    }
}

/// State the pusher task needs to correlate a `requestTrack` reply arriving
/// back over the transport with the pending oneshot it owes. Kept separate
/// from the peer's own session state (`id`/`profile`/`current_room`), which
/// stays exclusive to the main dispatch loop below — nothing here needs a
/// lock held across an `.await`.
#[derive(Default)]
struct PendingCalls {
    next_req_id: u64,
    track_requests: HashMap<String, oneshot::Sender<Option<TrackDraft>>>,
}

/// Spawn a peer actor driving `sink`/`source`, returning once the peer
/// disconnects (transport closed, or the auth timer expired unmet).
pub fn spawn(sink: Arc<dyn PeerSink>, source: Box<dyn PeerSource>, server: Arc<Server>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = PeerHandle { tx };
    let pending = Arc::new(Mutex::new(PendingCalls::default()));

    spawn_pusher(rx, sink.clone(), pending.clone());

    let actor = PeerActor {
        source,
        sink,
        server,
        id: None,
        profile: None,
        current_room: None,
        pending,
        auth_deadline: Instant::now() + AUTH_TIMER,
        handle,
    };
    tokio::spawn(actor.run());
}

/// Drains a peer's [`PeerCommand`] mailbox on its own task, independent of
/// [`PeerActor::run`]'s dispatch loop — see the module doc for why.
fn spawn_pusher(
    mut rx: mpsc::UnboundedReceiver<PeerCommand>,
    sink: Arc<dyn PeerSink>,
    pending: Arc<Mutex<PendingCalls>>,
) {
    tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                PeerCommand::Push { name, params } => {
                    let _ = sink.send(Outbound::Push { name, params }).await;
                }
                PeerCommand::RequestTrack { respond } => {
                    let req_id = {
                        let mut pending = pending.lock().unwrap();
                        pending.next_req_id += 1;
                        let req_id = format!("s{}", pending.next_req_id);
                        pending.track_requests.insert(req_id.clone(), respond);
                        req_id
                    };
                    let sent = sink
                        .send(Outbound::Call {
                            req_id: req_id.clone(),
                            name: "requestTrack".to_string(),
                            params: json!({}),
                        })
                        .await;
                    if sent.is_err() {
                        if let Some(respond) =
                            pending.lock().unwrap().track_requests.remove(&req_id)
                        {
                            let _ = respond.send(None);
                        }
                    }
                }
            }
        }
    });
}

/// Calls whose room round trip can land a `requestTrack` call back on the
/// very peer making the call — see [`PeerActor::spawn_room_roundtrip`].
fn reenters_self(call: &ClientCall) -> bool {
    matches!(
        call,
        ClientCall::BecomeDj | ClientCall::StepDown | ClientCall::SkipTurn | ClientCall::TrackEnded
    )
}

struct PeerActor {
    source: Box<dyn PeerSource>,
    sink: Arc<dyn PeerSink>,
    server: Arc<Server>,
    id: Option<String>,
    profile: Option<Value>,
    current_room: Option<RoomHandle>,
    pending: Arc<Mutex<PendingCalls>>,
    auth_deadline: Instant,
    handle: PeerHandle,
}

impl PeerActor {
    async fn run(mut self) {
        loop {
            tokio::select! {
                () = tokio::time::sleep_until(self.auth_deadline), if self.id.is_none() => {
                    info!("peer auth timer expired, closing");
                    break;
                }
                inbound = self.source.recv() => {
                    match inbound {
                        Some(Inbound::Call { req_id, name, params }) => {
                            self.handle_call(req_id, &name, params).await;
                        }
                        Some(Inbound::Reply { req_id, result }) => {
                            self.handle_reply(&req_id, result);
                        }
                        None => break,
                    }
                }
            }
        }
        self.disconnect().await;
    }

    fn handle_reply(&mut self, req_id: &str, result: Value) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(respond) = pending.track_requests.remove(req_id) {
            let draft: Option<TrackDraft> = serde_json::from_value(result).ok();
            let _ = respond.send(draft);
        }
    }

    async fn handle_call(&mut self, req_id: String, name: &str, params: Value) {
        match rpc::parse_call(name, params) {
            Ok(call) if reenters_self(&call) => {
                self.spawn_room_roundtrip(req_id, call);
            }
            Ok(call) => {
                let reply = self.dispatch(call).await;
                let _ = self
                    .sink
                    .send(Outbound::Reply {
                        req_id,
                        result: reply.into_value(),
                    })
                    .await;
            }
            Err(message) => {
                let _ = self
                    .sink
                    .send(Outbound::Reply {
                        req_id,
                        result: RpcReply::error(message).into_value(),
                    })
                    .await;
            }
        }
    }

    /// `becomeDj`/`stepDown`/`skipTurn`/`trackEnded` (see [`reenters_self`])
    /// run here instead of through [`Self::dispatch`]: their room round trip
    /// can call straight back into this same peer's `requestTrack` (a solo
    /// DJ fetching its own track, or rotating back onto itself next turn).
    /// That reply lands on this peer's own `source`, so awaiting the room
    /// here on the dispatch loop would make the loop wait on a message it
    /// can only read by *not* waiting — spawning the round trip onto its own
    /// task keeps `self.source.recv()` free to read it.
    fn spawn_room_roundtrip(&self, req_id: String, call: ClientCall) {
        let sink = self.sink.clone();
        let room = self.current_room.clone();
        let peer_id = self.id.clone().unwrap_or_default();
        tokio::spawn(async move {
            let reply = match room {
                None => RpcReply::error("you are not in a room"),
                Some(room) => {
                    let result = match call {
                        ClientCall::BecomeDj => room.add_dj(peer_id).await,
                        ClientCall::StepDown => room.remove_dj(peer_id).await,
                        ClientCall::SkipTurn => room.skip_turn(peer_id).await,
                        ClientCall::TrackEnded => room.track_ended(peer_id).await,
                        _ => unreachable!("reenters_self only admits these four"),
                    };
                    match result {
                        Ok(()) => RpcReply::ok(json!({ "success": true })),
                        Err(e) => RpcReply::error(e.to_string()),
                    }
                }
            };
            let _ = sink
                .send(Outbound::Reply {
                    req_id,
                    result: reply.into_value(),
                })
                .await;
        });
    }

    async fn dispatch(&mut self, call: ClientCall) -> RpcReply {
        match call {
            ClientCall::Join(p) => self.join(&p.jwt),
            ClientCall::Authenticate(p) => self.authenticate(&p.jwt),
            ClientCall::FetchRooms => RpcReply::ok(self.server.room_summaries()),
            ClientCall::CreateRoom(p) => self.create_room(p.name),
            ClientCall::JoinRoom(p) => self.join_room(&p.id).await,
            ClientCall::LeaveRoom => self.leave_room().await,
            ClientCall::BecomeDj | ClientCall::StepDown | ClientCall::SkipTurn | ClientCall::TrackEnded => {
                unreachable!("routed through spawn_room_roundtrip before reaching dispatch")
            }
            ClientCall::UpdatedQueue => self.updated_queue(),
            ClientCall::SendChat(p) => self.send_chat(p.message),
            ClientCall::SetProfile(p) => self.set_profile(p.profile),
            ClientCall::Vote(p) => self.vote(p).await,
        }
    }

    // ---- auth -------------------------------------------------------

    fn join(&mut self, jwt_token: &str) -> RpcReply {
        if self.id.is_some() {
            return RpcReply::error("already authenticated");
        }
        if jwt::verify_join_invite(self.server.config(), jwt_token).is_err() {
            return RpcReply::error("invalid token");
        }
        let peer_id = Uuid::now_v7().to_string();
        self.id = Some(peer_id.clone());
        self.server
            .register_peer(peer_id.clone(), self.handle.clone());

        match jwt::sign_session(self.server.config(), &peer_id) {
            Ok(token) => RpcReply::ok(json!({ "token": token, "peerId": peer_id })),
            Err(_) => RpcReply::error("internal error"),
        }
    }

    fn authenticate(&mut self, jwt_token: &str) -> RpcReply {
        if self.id.is_some() {
            return RpcReply::error("already authenticated");
        }
        match jwt::verify_session(self.server.config(), jwt_token) {
            Ok(peer_id) => {
                self.id = Some(peer_id.clone());
                self.server
                    .register_peer(peer_id.clone(), self.handle.clone());
                RpcReply::ok(json!({ "peerId": peer_id }))
            }
            Err(_) => RpcReply::error("invalid token"),
        }
    }

    fn require_id(&self) -> Result<String, RpcReply> {
        self.id
            .clone()
            .ok_or_else(|| RpcReply::error("invalid token"))
    }

    // ---- rooms --------------------------------------------------------

    fn create_room(&mut self, name: String) -> RpcReply {
        let Ok(peer_id) = self.require_id() else {
            return RpcReply::error("invalid token");
        };
        if name.trim().is_empty() {
            return RpcReply::error("name must be at least 1 character");
        }
        match self.server.create_room(name, peer_id) {
            Ok(room) => RpcReply::ok(room.summary()),
            Err(e) => RpcReply::error(e.to_string()),
        }
    }

    async fn join_room(&mut self, room_id: &str) -> RpcReply {
        if self.require_id().is_err() {
            return RpcReply::error("invalid token");
        }
        let Ok(room_id) = Uuid::parse_str(room_id) else {
            return RpcReply::error("room not found");
        };
        let Some(room) = self.server.get_room(room_id) else {
            return RpcReply::error("room not found");
        };

        // Open question #3, resolved: a peer already in a room leaves it
        // first rather than appearing on two rosters at once.
        if self.current_room.is_some() {
            self.leave_room().await;
        }

        let peer_id = self.id.clone().unwrap();
        let snapshot = room.add_peer(peer_id, self.handle.clone()).await;
        self.current_room = Some(room);
        RpcReply::ok(snapshot)
    }

    async fn leave_room(&mut self) -> RpcReply {
        let Some(room) = self.current_room.take() else {
            return RpcReply::error("you are not in a room");
        };
        room.remove_peer(self.id.clone().unwrap_or_default()).await;
        RpcReply::ok(json!({ "success": true }))
    }

    // ---- dj rotation ----------------------------------------------------
    //
    // becomeDj/stepDown/skipTurn/trackEnded are handled by
    // `spawn_room_roundtrip` rather than methods here — see `reenters_self`.

    /// Stays a no-op for a non-next-DJ caller (design note #5) — always
    /// replies success either way, since the spec treats it as idempotent.
    fn updated_queue(&mut self) -> RpcReply {
        if let (Some(room), Some(peer_id)) = (&self.current_room, &self.id) {
            room.updated_queue(peer_id.clone());
        }
        RpcReply::ok(json!({ "success": true }))
    }

    // ---- chat / profile / votes -----------------------------------------

    fn send_chat(&mut self, message: String) -> RpcReply {
        if message.trim().is_empty() {
            return RpcReply::error("can't send a blank message");
        }
        let Some(room) = &self.current_room else {
            return RpcReply::error("you are not in a room");
        };
        let peer_id = self.id.clone().unwrap_or_default();
        room.send_chat(peer_id, message);
        RpcReply::ok(json!({ "success": true }))
    }

    fn set_profile(&mut self, profile: Value) -> RpcReply {
        self.profile = Some(profile.clone());
        if let (Some(room), Some(peer_id)) = (&self.current_room, &self.id) {
            room.broadcast_profile(peer_id.clone(), profile);
        }
        RpcReply::ok(json!({ "success": true, "peerId": self.id }))
    }

    async fn vote(&mut self, params: VoteParams) -> RpcReply {
        let Some(room) = self.current_room.clone() else {
            return RpcReply::error("you are not in a room");
        };
        let peer_id = self.id.clone().unwrap_or_default();
        match room.set_vote(peer_id, params.direction.is_downvote()).await {
            Ok(()) => RpcReply::ok(json!({ "success": true })),
            Err(e) => RpcReply::error(e.to_string()),
        }
    }

    // ---- lifecycle --------------------------------------------------------

    async fn disconnect(mut self) {
        // Resolve any requestTrack call still pending on this peer before
        // telling the room it's gone: the room's own round trip may be the
        // thing awaiting this peer's reply, and it won't get to process a
        // `removePeer` command until that round trip completes.
        {
            let mut pending = self.pending.lock().unwrap();
            for (_, respond) in pending.track_requests.drain() {
                let _ = respond.send(None);
            }
        }
        if let Some(room) = self.current_room.take() {
            if let Some(peer_id) = self.id.clone() {
                room.remove_peer(peer_id).await;
            }
        }
        if let Some(peer_id) = &self.id {
            self.server.remove_peer(peer_id);
        }
        self.sink.close().await;
        warn!(peer_id = ?self.id, "peer disconnected");
    }
}
