//! Turntable Server
//!
//! Realtime coordination engine for collaborative audio rooms: peers
//! connect, join a room, take turns as DJ, and vote to skip tracks. See
//! `SPEC_FULL.md` for the full module-by-module design.

pub mod auth;
pub mod config;
pub mod http;
pub mod peer;
pub mod registry;
pub mod room;
pub mod rpc;
pub mod server;
pub mod testing;
pub mod track;
pub mod transport;
pub mod ws;
