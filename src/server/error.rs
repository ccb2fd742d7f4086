//! Server Error Types

use thiserror::Error;

/// Errors the server's room/peer directories can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServerError {
    #[error("room not found")]
    RoomNotFound,

    #[error("invalid token")]
    InvalidToken,

    #[error("name must be at least 1 character")]
    BlankRoomName,
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
