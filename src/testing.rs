//! In-memory test transport.
//!
//! The production transport is a websocket (see [`crate::ws`]); this module
//! is the in-memory stand-in the module docs on [`crate::transport`]
//! describe — a channel pair wired to the same [`crate::transport::PeerSink`]/
//! [`crate::transport::PeerSource`] traits so the room/peer/server state
//! machine can be driven end to end without a real socket. Exposed publicly
//! (not `#[cfg(test)]`-gated) so the crate's `tests/` integration suite, a
//! separate compilation unit, can reach it too.
//!
//! Outbound traffic is split into two channels rather than one: pushes and
//! replies land on [`TestClient`], server-initiated calls (`requestTrack`,
//! `cycleSelectedQueue`) land on [`CallListener`]. A test that needs to
//! answer on a DJ's behalf can hand that DJ's `CallListener` to a spawned
//! background task ([`CallListener::spawn_auto_reply`]) while the
//! foreground test keeps driving and asserting on the `TestClient` — no
//! single receiver has to multiplex both concerns.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::transport::{Inbound, Outbound, PeerSink, PeerSource, TransportError};

struct ChannelSink {
    push_tx: mpsc::UnboundedSender<Outbound>,
    call_tx: mpsc::UnboundedSender<Outbound>,
}

#[async_trait]
impl PeerSink for ChannelSink {
    async fn send(&self, message: Outbound) -> Result<(), TransportError> {
        match &message {
            Outbound::Call { .. } => self.call_tx.send(message),
            Outbound::Push { .. } | Outbound::Reply { .. } => self.push_tx.send(message),
        }
        .map_err(|_| TransportError::Closed)
    }

    async fn close(&self) {}
}

struct ChannelSource {
    rx: mpsc::UnboundedReceiver<Inbound>,
}

#[async_trait]
impl PeerSource for ChannelSource {
    async fn recv(&mut self) -> Option<Inbound> {
        self.rx.recv().await
    }
}

/// The test-side end of an in-memory transport: drives pushes and replies
/// for a connected [`crate::peer`] actor, and makes outbound RPC calls as a
/// real client would.
pub struct TestClient {
    push_rx: mpsc::UnboundedReceiver<Outbound>,
    inbound_tx: mpsc::UnboundedSender<Inbound>,
    next_req_id: u64,
    buffered: Vec<Outbound>,
}

impl TestClient {
    fn fresh_req_id(&mut self) -> String {
        self.next_req_id += 1;
        format!("c{}", self.next_req_id)
    }

    /// Pull the next push/reply matching `pred`, buffering (never
    /// dropping) anything read along the way that didn't match, so a later
    /// call for a different message still finds it.
    async fn next_matching(&mut self, mut pred: impl FnMut(&Outbound) -> bool) -> Outbound {
        if let Some(pos) = self.buffered.iter().position(|m| pred(m)) {
            return self.buffered.remove(pos);
        }
        loop {
            let msg = self
                .push_rx
                .recv()
                .await
                .expect("transport closed while waiting for a message");
            if pred(&msg) {
                return msg;
            }
            self.buffered.push(msg);
        }
    }

    /// Make an RPC call and await its reply, as a real client would.
    pub async fn call(&mut self, name: &str, params: Value) -> Value {
        let req_id = self.fresh_req_id();
        let _ = self.inbound_tx.send(Inbound::Call {
            req_id: req_id.clone(),
            name: name.to_string(),
            params,
        });
        let msg = self
            .next_matching(|m| matches!(m, Outbound::Reply { req_id: got, .. } if *got == req_id))
            .await;
        match msg {
            Outbound::Reply { result, .. } => result,
            _ => unreachable!(),
        }
    }

    /// Wait for the next server-initiated one-way push named `name`.
    pub async fn recv_push(&mut self, name: &str) -> Value {
        let msg = self
            .next_matching(|m| matches!(m, Outbound::Push { name: got, .. } if got == name))
            .await;
        match msg {
            Outbound::Push { params, .. } => params,
            _ => unreachable!(),
        }
    }

    /// Disconnect, as a dropped websocket would.
    pub fn disconnect(self) {
        drop(self.inbound_tx);
    }

    /// Wait for the push/reply channel to close (the peer actor tore
    /// itself down, e.g. the auth timer fired), without panicking the way
    /// [`recv_push`](Self::recv_push) would on a closed channel.
    pub async fn wait_closed(&mut self) {
        self.buffered.clear();
        while self.push_rx.recv().await.is_some() {}
    }
}

/// The test-side end of the server-initiated call channel: `requestTrack`
/// and `cycleSelectedQueue` land here, separate from [`TestClient`] so a
/// DJ's calls can be answered from a background task without racing the
/// foreground test's push assertions.
pub struct CallListener {
    call_rx: mpsc::UnboundedReceiver<Outbound>,
    inbound_tx: mpsc::UnboundedSender<Inbound>,
    buffered: Vec<Outbound>,
}

impl CallListener {
    /// Wait for the next server-initiated call named `name`, returning its
    /// `req_id` so the test can [`reply`](Self::reply) to it.
    pub async fn recv_call(&mut self, name: &str) -> String {
        if let Some(pos) = self
            .buffered
            .iter()
            .position(|m| matches!(m, Outbound::Call { name: got, .. } if got == name))
        {
            let msg = self.buffered.remove(pos);
            return match msg {
                Outbound::Call { req_id, .. } => req_id,
                _ => unreachable!(),
            };
        }
        loop {
            let msg = self
                .call_rx
                .recv()
                .await
                .expect("transport closed while waiting for a call");
            match msg {
                Outbound::Call { req_id, name: got, .. } if got == name => return req_id,
                other => self.buffered.push(other),
            }
        }
    }

    /// Reply to a call previously returned by [`recv_call`](Self::recv_call).
    pub fn reply(&self, req_id: impl Into<String>, result: Value) {
        let _ = self.inbound_tx.send(Inbound::Reply {
            req_id: req_id.into(),
            result,
        });
    }

    /// Spawn a background task that answers every `requestTrack` call with
    /// a track built from `payload`, incrementing a counter per reply.
    /// Used for DJs in tests where the exact prefetch choreography isn't
    /// the thing under test (everything except S2, which asserts the
    /// payload makes it through verbatim).
    pub fn spawn_auto_reply_request_track(mut self, title_prefix: &'static str) {
        tokio::spawn(async move {
            let mut n = 0u32;
            loop {
                let req_id = self.recv_call("requestTrack").await;
                n += 1;
                self.reply(req_id, serde_json::json!({ "title": format!("{title_prefix}-{n}") }));
            }
        });
    }
}

/// Build a connected in-memory transport pair: the `(sink, source)` half
/// to hand to [`crate::peer::spawn`], a [`TestClient`] to drive pushes and
/// client-initiated calls, and a [`CallListener`] for server-initiated
/// calls this peer receives as a DJ.
#[must_use]
pub fn test_peer_pair() -> (Arc<dyn PeerSink>, Box<dyn PeerSource>, TestClient, CallListener) {
    let (push_tx, push_rx) = mpsc::unbounded_channel::<Outbound>();
    let (call_tx, call_rx) = mpsc::unbounded_channel::<Outbound>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<Inbound>();

    let sink: Arc<dyn PeerSink> = Arc::new(ChannelSink { push_tx, call_tx });
    let source: Box<dyn PeerSource> = Box::new(ChannelSource { rx: in_rx });
    let client = TestClient {
        push_rx,
        inbound_tx: in_tx.clone(),
        next_req_id: 0,
        buffered: Vec::new(),
    };
    let calls = CallListener {
        call_rx,
        inbound_tx: in_tx,
        buffered: Vec::new(),
    };

    (sink, source, client, calls)
}
