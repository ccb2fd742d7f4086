//! Room Error Types

use thiserror::Error;

/// Errors a [`super::Room`] operation can report to the calling peer.
/// Every variant's message is the exact string the peer contract promises.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("already a dj")]
    AlreadyDj,

    #[error("too many djs, not enough mics")]
    TooManyDjs,

    #[error("not a dj")]
    NotADj,

    #[error("must be active dj to skip turn")]
    NotActiveDj,

    #[error("there is no song playing to vote on")]
    NoSongPlaying,

    /// The room's task has already shut down (45s empty-room removal raced
    /// with this call). Callers treat this like `room not found`.
    #[error("room not found")]
    RoomGone,
}

/// Result type for room operations.
pub type RoomResult<T> = Result<T, RoomError>;
