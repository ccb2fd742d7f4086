//! RPC Dispatch
//!
//! Table-driven name-to-handler routing for the fourteen client-to-server
//! calls in the peer contract. [`parse_call`] is the "method table": it
//! deserializes `params` into a typed [`ClientCall`] variant or rejects an
//! unrecognized name, matching the dispatcher's uniform reply shape from
//! the rest of the stack — every handler in [`crate::peer`] returns an
//! [`RpcReply`], never a raw panic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reply to an RPC call: either a tagged failure or an arbitrary success
/// payload, matching the wire shape `{error:true,message}` or a bare object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RpcReply {
    Error { error: bool, message: String },
    Ok(Value),
}

impl RpcReply {
    /// Build an error reply.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: true,
            message: message.into(),
        }
    }

    /// Build a success reply from any serializable payload.
    pub fn ok(value: impl Serialize) -> Self {
        Self::Ok(serde_json::to_value(value).unwrap_or(Value::Null))
    }

    /// Serialize the reply into the JSON value sent back over the wire.
    #[must_use]
    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or(Value::Null)
    }
}

impl<T, E> From<Result<T, E>> for RpcReply
where
    T: Serialize,
    E: std::fmt::Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JoinParams {
    pub jwt: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateParams {
    pub jwt: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomParams {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRoomParams {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SendChatParams {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SetProfileParams {
    pub profile: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// `true` encodes a downvote, per the room's `votes` map convention.
    #[must_use]
    pub fn is_downvote(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteParams {
    pub direction: VoteDirection,
}

/// Every call a client can make, with its deserialized parameters.
#[derive(Debug)]
pub enum ClientCall {
    Join(JoinParams),
    Authenticate(AuthenticateParams),
    FetchRooms,
    CreateRoom(CreateRoomParams),
    JoinRoom(JoinRoomParams),
    LeaveRoom,
    BecomeDj,
    StepDown,
    SkipTurn,
    TrackEnded,
    UpdatedQueue,
    SendChat(SendChatParams),
    SetProfile(SetProfileParams),
    Vote(VoteParams),
}

/// Look up `name` in the static method table and deserialize `params` into
/// the matching call. An unrecognized name is the one error the dispatcher
/// reports verbatim as specified: `"Invalid method name"`.
pub fn parse_call(name: &str, params: Value) -> Result<ClientCall, String> {
    fn parse<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T, String> {
        serde_json::from_value(params).map_err(|e| e.to_string())
    }

    match name {
        "join" => Ok(ClientCall::Join(parse(params)?)),
        "authenticate" => Ok(ClientCall::Authenticate(parse(params)?)),
        "fetchRooms" => Ok(ClientCall::FetchRooms),
        "createRoom" => Ok(ClientCall::CreateRoom(parse(params)?)),
        "joinRoom" => Ok(ClientCall::JoinRoom(parse(params)?)),
        "leaveRoom" => Ok(ClientCall::LeaveRoom),
        "becomeDj" => Ok(ClientCall::BecomeDj),
        "stepDown" => Ok(ClientCall::StepDown),
        "skipTurn" => Ok(ClientCall::SkipTurn),
        "trackEnded" => Ok(ClientCall::TrackEnded),
        "updatedQueue" => Ok(ClientCall::UpdatedQueue),
        "sendChat" => Ok(ClientCall::SendChat(parse(params)?)),
        "setProfile" => Ok(ClientCall::SetProfile(parse(params)?)),
        "vote" => Ok(ClientCall::Vote(parse(params)?)),
        _ => Err("Invalid method name".to_string()),
    }
}
