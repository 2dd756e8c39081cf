//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomId};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId invalid format error (not a valid UUID format)
    #[error("RoomId must be a valid UUID format (got: {0})")]
    RoomIdInvalidFormat(String),
}

/// Errors reported by the room registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The room does not exist or was already destroyed
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// The connection is not a member of the room
    #[error("Connection {connection_id} is not a member of room {room_id}")]
    MemberNotPresent {
        room_id: RoomId,
        connection_id: ConnectionId,
    },

    /// The connection is already bound to a different room
    #[error("Connection {connection_id} is already a member of room {room_id}")]
    BoundElsewhere {
        connection_id: ConnectionId,
        room_id: RoomId,
    },
}
