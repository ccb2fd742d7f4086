//! HTTP surface — the minimal axum router that makes this crate a runnable
//! binary: a health check, the websocket upgrade, and track byte serving.
//!
//! Track serving is deliberately thin (§1 treats HTTP hosting of payloads
//! as an external collaborator the engine only mints URLs for); this is
//! the simplest faithful stand-in so the system runs end to end, but
//! nothing in the engine's own tests depends on it.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::peer;
use crate::server::Server;
use crate::ws;

pub fn router(server: Arc<Server>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_upgrade))
        .route("/tracks/{id}", get(get_track))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(server)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(server): State<Arc<Server>>) -> Response {
    ws.on_upgrade(move |socket| async move {
        let (sink, source) = ws::split(socket);
        peer::spawn(sink, source, server);
    })
}

async fn get_track(
    State(server): State<Arc<Server>>,
    Path(id): Path<Uuid>,
) -> Result<Response, StatusCode> {
    match server.registry().get(id) {
        Some(track) => Ok(Json(track).into_response()),
        None => Err(StatusCode::NOT_FOUND),
    }
}
