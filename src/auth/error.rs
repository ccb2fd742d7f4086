//! Authentication Error Types

use thiserror::Error;

/// Authentication error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token failed signature verification or carries the wrong claim shape.
    #[error("invalid token")]
    InvalidToken,

    /// Token's `u`/`n` claims don't match this server instance.
    #[error("invalid token")]
    ServerMismatch,

    /// Token has expired.
    #[error("invalid token")]
    TokenExpired,

    /// Token signing/encoding failed unexpectedly.
    #[error("internal error")]
    Internal(#[from] jsonwebtoken::errors::Error),
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
