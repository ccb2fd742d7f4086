//! Peer Transport
//!
//! Abstracts "a reliable, ordered, bidirectional message channel per peer"
//! into a pair of traits so the rest of the engine never touches a socket
//! directly. Production code wraps an axum [`axum::extract::ws::WebSocket`]
//! (see [`crate::ws`]); tests wire the same traits to in-memory channels so
//! the room/peer/server state machine runs without a real connection.
//!
//! The read and write halves are deliberately separate traits rather than
//! one bundled object. [`PeerSource::recv`] is exclusive to a peer's main
//! dispatch loop; [`PeerSink::send`] is `&self` and safe to call
//! concurrently, because a room's `requestTrack` call can land back on a
//! peer's own mailbox while that very peer is mid-dispatch on the call that
//! triggered it (the first DJ's `becomeDj` asks the first DJ for a track).
//! Splitting sender from receiver is what lets a dedicated task drain that
//! mailbox without waiting on the dispatch loop it would otherwise deadlock
//! against — see [`crate::peer::spawn`].
//!
//! Wire messages are plain `{name, params}` objects. Calls that expect a
//! reply (client RPCs, and the two server-initiated calls `requestTrack`
//! and `cycleSelectedQueue`) are correlated by a `reqId` the caller mints
//! and the callee echoes back.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A message read off the wire.
#[derive(Debug, Clone)]
pub enum Inbound {
    /// An RPC call, expecting exactly one reply tagged with `req_id`.
    Call {
        req_id: String,
        name: String,
        params: Value,
    },
    /// A reply to a call this side made, correlated by `req_id`.
    Reply { req_id: String, result: Value },
}

/// A message written to the wire.
#[derive(Debug, Clone)]
pub enum Outbound {
    /// A one-way push; no reply expected.
    Push { name: String, params: Value },
    /// A reply to a peer's RPC call.
    Reply { req_id: String, result: Value },
    /// A call expecting a reply, tagged with a freshly minted `req_id`.
    Call {
        req_id: String,
        name: String,
        params: Value,
    },
}

/// Errors a transport implementation can surface. The engine only ever
/// reacts to these by tearing the peer down; it never retries.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
    #[error("transport error: {0}")]
    Other(String),
}

/// The write half of a peer's transport. Cheaply shareable (`Arc<dyn
/// PeerSink>`) and safe to call from more than one task at a time.
#[async_trait]
pub trait PeerSink: Send + Sync {
    /// Write one message to the wire.
    async fn send(&self, message: Outbound) -> Result<(), TransportError>;

    /// Tear down the underlying connection.
    async fn close(&self);
}

/// The read half of a peer's transport. Exclusively owned by the peer
/// actor's main loop — nothing else ever needs to read inbound frames.
#[async_trait]
pub trait PeerSource: Send {
    /// Read the next message, or `None` once the peer has disconnected.
    async fn recv(&mut self) -> Option<Inbound>;
}
