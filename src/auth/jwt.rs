//! Token Generation and Validation
//!
//! Mints and verifies the two opaque tokens the engine hands out: a
//! join-invite (issued out of band, consumed by `join`) and a session token
//! (issued by `join`, consumed by `authenticate` on reconnect). Both are
//! HMAC-SHA256 signed with a process-wide secret — symmetric, since nothing
//! here needs to verify tokens it didn't sign.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::{AuthError, AuthResult};
use crate::config::Config;

/// Claims embedded in every token. `peer_id` is only present on session
/// tokens; its absence is what distinguishes a join-invite from a session
/// token during verification.
///
/// Both token kinds use the same `u`/`n` field names for the server's
/// websocket URL and name — there is exactly one canonical pair of claim
/// names, bound the same way regardless of which `sign_*` function minted
/// the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Server websocket URL this token is bound to.
    pub u: String,
    /// Server name this token is bound to.
    pub n: String,
    /// Peer id, present only on session tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i: Option<String>,
}

/// Mint a join-invite token, scoped to this server instance.
pub fn sign_join_invite(config: &Config) -> AuthResult<String> {
    let claims = Claims {
        u: config.ws_url.clone(),
        n: config.server_name.clone(),
        i: None,
    };
    encode_claims(config, &claims)
}

/// Mint a session token binding `peer_id` to this server instance.
pub fn sign_session(config: &Config, peer_id: &str) -> AuthResult<String> {
    let claims = Claims {
        u: config.ws_url.clone(),
        n: config.server_name.clone(),
        i: Some(peer_id.to_string()),
    };
    encode_claims(config, &claims)
}

fn encode_claims(config: &Config, claims: &Claims) -> AuthResult<String> {
    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &key).map_err(AuthError::Internal)
}

fn decode_claims(config: &Config, token: &str) -> AuthResult<Claims> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = false;
    let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;
    Ok(data.claims)
}

/// Verify a token as a join-invite for `config`'s server instance.
///
/// Rejects any token whose `u`/`n` claims don't match this server, and any
/// token that carries a peer id (that would be a session token, not an
/// invite).
pub fn verify_join_invite(config: &Config, token: &str) -> AuthResult<Claims> {
    let claims = decode_claims(config, token)?;
    if claims.i.is_some() {
        return Err(AuthError::InvalidToken);
    }
    verify_server_identity(config, claims)
}

/// Verify a token as a session token for `config`'s server instance,
/// returning the embedded peer id.
pub fn verify_session(config: &Config, token: &str) -> AuthResult<String> {
    let claims = decode_claims(config, token)?;
    let claims = verify_server_identity(config, claims)?;
    claims.i.ok_or(AuthError::InvalidToken)
}

fn verify_server_identity(config: &Config, claims: Claims) -> AuthResult<Claims> {
    if claims.u != config.ws_url || claims.n != config.server_name {
        return Err(AuthError::ServerMismatch);
    }
    Ok(claims)
}
