//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Symmetric secret used to sign and verify join-invite and session tokens.
    pub jwt_secret: String,

    /// Public identifier of this server instance, embedded in every token.
    pub server_id: String,

    /// Public display name of this server instance, embedded in every token.
    pub server_name: String,

    /// Public base URL clients use to open the websocket connection, e.g.
    /// `wss://rooms.example.com/`. Tokens are bound to this value.
    pub ws_url: String,

    /// Public HTTP base URL used to mint track payload URLs, e.g.
    /// `https://rooms.example.com/`.
    pub http_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            server_id: env::var("SERVER_ID").unwrap_or_else(|_| uuid::Uuid::now_v7().to_string()),
            server_name: env::var("SERVER_NAME").unwrap_or_else(|_| "turntable".into()),
            ws_url: env::var("WS_URL").context("WS_URL must be set")?,
            http_url: env::var("HTTP_URL").context("HTTP_URL must be set")?,
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            jwt_secret: "test-secret".into(),
            server_id: "test-server".into(),
            server_name: "test-room-server".into(),
            ws_url: "wss://test.invalid/".into(),
            http_url: "https://test.invalid/".into(),
        }
    }
}
