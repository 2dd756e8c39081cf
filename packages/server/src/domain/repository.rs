//! Room registry contract.
//!
//! The registry exclusively owns all room, member and chat state. Every
//! operation is atomic from the caller's point of view: no caller can observe
//! a room with zero members, or a connection index that disagrees with room
//! membership.

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, MediaKind, Member, Room},
    error::RegistryError,
    value_object::{ConnectionId, RoomId},
};

/// Result of inserting a member into a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddMemberOutcome {
    /// The connection was not yet a member
    Added(Member),
    /// A stale entry with the same connection id was evicted first; its
    /// departure is owed before the new join is announced
    StaleReplaced { member: Member, prior: Member },
}

impl AddMemberOutcome {
    pub fn member(&self) -> &Member {
        match self {
            Self::Added(member) | Self::StaleReplaced { member, .. } => member,
        }
    }
}

/// Result of removing a member from a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveMemberOutcome {
    /// Other members remain in the room
    Remaining {
        member: Member,
        remaining: Vec<ConnectionId>,
    },
    /// The room became empty and was destroyed in the same operation
    RoomDestroyed { member: Member },
}

impl RemoveMemberOutcome {
    pub fn member(&self) -> &Member {
        match self {
            Self::Remaining { member, .. } | Self::RoomDestroyed { member } => member,
        }
    }

    /// Members still in the room after the removal
    pub fn remaining(&self) -> &[ConnectionId] {
        match self {
            Self::Remaining { remaining, .. } => remaining,
            Self::RoomDestroyed { .. } => &[],
        }
    }
}

/// Room registry (data access abstraction used by the use cases)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a fresh empty room and return its id. Never fails.
    async fn create_room(&self) -> RoomId;

    /// Snapshot of a live room
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RegistryError>;

    /// Snapshot of every live room
    async fn list_rooms(&self) -> Vec<Room>;

    /// Add a member with both media flags off, replacing any entry with the
    /// same connection id in that room
    async fn add_member(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        display_name: String,
    ) -> Result<AddMemberOutcome, RegistryError>;

    /// Remove a member; destroys the room when its membership empties
    async fn remove_member(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<RemoveMemberOutcome, RegistryError>;

    /// Append to the room's history, returning the evicted oldest message if any
    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<Option<ChatMessage>, RegistryError>;

    /// Set a member's media flag, returning the previous value
    async fn set_toggle(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Result<bool, RegistryError>;

    /// Room the connection is currently bound to
    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// Member record of a bound connection
    async fn get_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<Member>;

    /// Connection ids of the room's members, in join order
    async fn member_ids(&self, room_id: &RoomId) -> Result<Vec<ConnectionId>, RegistryError>;
}
