//! WebSocket transport — the production [`PeerSink`]/[`PeerSource`] pair.
//!
//! Grounded on the teacher's `ws::handle_socket`: split the axum
//! `WebSocket` into sink/stream halves, forward outbound frames through an
//! unbounded channel from a dedicated task so a slow write never blocks
//! whichever task is sending, and translate each text frame into the
//! engine's wire envelope (`{reqId?, name, params}` for calls/pushes,
//! `{reqId, result}` for replies).

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::warn;

use crate::transport::{Inbound, Outbound, PeerSink, PeerSource, TransportError};

/// Split a freshly upgraded websocket into a cloneable [`PeerSink`] and an
/// exclusively-owned [`PeerSource`]. The actual socket write half lives on
/// a dedicated forwarder task reading off `outbound_tx`, so the sink is
/// just a cheap channel handle underneath.
#[must_use]
pub fn split(socket: WebSocket) -> (Arc<dyn PeerSink>, Box<dyn PeerSource>) {
    let (mut sender, receiver): (SplitSink<WebSocket, Message>, _) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    (
        Arc::new(WsSink { outbound_tx }),
        Box::new(WsSource { receiver }),
    )
}

struct WsSink {
    outbound_tx: mpsc::UnboundedSender<Message>,
}

#[async_trait::async_trait]
impl PeerSink for WsSink {
    async fn send(&self, message: Outbound) -> Result<(), TransportError> {
        let envelope = match message {
            Outbound::Push { name, params } => json!({ "name": name, "params": params }),
            Outbound::Call {
                req_id,
                name,
                params,
            } => json!({ "reqId": req_id, "name": name, "params": params }),
            Outbound::Reply { req_id, result } => json!({ "reqId": req_id, "result": result }),
        };
        let text = serde_json::to_string(&envelope)
            .map_err(|e| TransportError::Other(e.to_string()))?;
        self.outbound_tx
            .send(Message::Text(text.into()))
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&self) {
        let _ = self.outbound_tx.send(Message::Close(None));
    }
}

struct WsSource {
    receiver: SplitStream<WebSocket>,
}

#[async_trait::async_trait]
impl PeerSource for WsSource {
    async fn recv(&mut self) -> Option<Inbound> {
        loop {
            match self.receiver.next().await {
                Some(Ok(Message::Text(text))) => {
                    let Ok(value) = serde_json::from_str::<Value>(&text) else {
                        warn!("dropping unparseable websocket frame");
                        continue;
                    };
                    if let Some(inbound) = parse_envelope(value) {
                        return Some(inbound);
                    }
                }
                Some(Ok(Message::Close(_))) | None => return None,
                Some(Ok(_)) => continue,
                Some(Err(_)) => return None,
            }
        }
    }
}

/// A frame carrying `name` is a call; a frame carrying `result` without a
/// `name` is a reply to a call this side made.
fn parse_envelope(value: Value) -> Option<Inbound> {
    let obj = value.as_object()?;
    if let Some(name) = obj.get("name").and_then(Value::as_str) {
        let req_id = obj
            .get("reqId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        return Some(Inbound::Call {
            req_id,
            name: name.to_string(),
            params,
        });
    }
    if let Some(req_id) = obj.get("reqId").and_then(Value::as_str) {
        let result = obj.get("result").cloned().unwrap_or(Value::Null);
        return Some(Inbound::Reply {
            req_id: req_id.to_string(),
            result,
        });
    }
    None
}
