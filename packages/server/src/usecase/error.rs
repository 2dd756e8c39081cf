//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, RegistryError};

/// Why an inbound event produced no regular notifications
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Join against a room that does not exist (or was already destroyed).
    /// Surfaced to the requester as an `error` event.
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// The sender is not joined to any room. Dropped silently.
    #[error("Connection {0} is not joined to any room")]
    NotBound(ConnectionId),

    /// The connection is still bound to another room
    #[error("Connection {0} is already bound to another room")]
    AlreadyBound(ConnectionId),
}

impl From<RegistryError> for RouteError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id.into_string()),
            RegistryError::MemberNotPresent { connection_id, .. } => Self::NotBound(connection_id),
            RegistryError::BoundElsewhere { connection_id, .. } => {
                Self::AlreadyBound(connection_id)
            }
        }
    }
}
