//! Domain factories for creating fresh identifiers.

use uuid::Uuid;

use super::{ConnectionId, MessageId, RoomId};

/// Factory for generating RoomId instances.
///
/// Encapsulates identifier generation, separated from the validation logic in RoomId.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a new RoomId with a random UUID v4.
    pub fn generate() -> RoomId {
        RoomId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating ConnectionId instances for accepted sockets.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(Uuid::new_v4())
    }
}
