//! Core domain models for the signaling relay.

use serde::Serialize;

use super::{
    history::ChatHistory,
    value_object::{ConnectionId, MessageId, RoomId, Timestamp},
};

/// A transient group of connected members sharing presence, negotiation
/// routing and a chat history.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Members in join order; `connection_id` is unique within this list
    pub members: Vec<Member>,
    /// Most recent chat messages, oldest first
    pub history: ChatHistory,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room with the default history capacity
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            history: ChatHistory::default(),
            created_at,
        }
    }

    /// Create a new empty room keeping at most `history_capacity` messages
    pub fn with_history_capacity(id: RoomId, created_at: Timestamp, history_capacity: usize) -> Self {
        Self {
            id,
            members: Vec::new(),
            history: ChatHistory::with_capacity(history_capacity),
            created_at,
        }
    }

    /// Insert a member, evicting and returning any entry with the same connection id.
    pub fn add_member(&mut self, member: Member) -> Option<Member> {
        let prior = self.remove_member(&member.connection_id);
        self.members.push(member);
        prior
    }

    /// Remove a member by connection id
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> Option<Member> {
        let index = self
            .members
            .iter()
            .position(|m| &m.connection_id == connection_id)?;
        Some(self.members.remove(index))
    }

    /// Get a member by connection id
    pub fn get_member(&self, connection_id: &ConnectionId) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| &m.connection_id == connection_id)
    }

    fn get_member_mut(&mut self, connection_id: &ConnectionId) -> Option<&mut Member> {
        self.members
            .iter_mut()
            .find(|m| &m.connection_id == connection_id)
    }

    /// Set a media flag on a member, returning the previous value.
    pub fn set_toggle(
        &mut self,
        connection_id: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Option<bool> {
        let member = self.get_member_mut(connection_id)?;
        let flag = match kind {
            MediaKind::Video => &mut member.video_enabled,
            MediaKind::Audio => &mut member.audio_enabled,
        };
        Some(std::mem::replace(flag, enabled))
    }

    /// Append a message to the history, returning the evicted oldest one if any
    pub fn append_message(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        self.history.push(message)
    }

    /// Connection ids of all members
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members
            .iter()
            .map(|m| m.connection_id.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One participant's state within a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub connection_id: ConnectionId,
    /// Caller-supplied, neither validated nor unique
    pub display_name: String,
    pub video_enabled: bool,
    pub audio_enabled: bool,
    pub joined_at: Timestamp,
}

impl Member {
    /// Create a new member with both media flags off
    pub fn new(connection_id: ConnectionId, display_name: String, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            display_name,
            video_enabled: false,
            audio_enabled: false,
            joined_at,
        }
    }
}

/// Which media flag a toggle event targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

/// A chat message as stored in a room's history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    /// Display name bound to the sending connection at send time
    pub author: String,
    pub body: String,
    /// Assigned on receipt, never client-supplied
    pub sent_at: Timestamp,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(id: MessageId, author: String, body: String, sent_at: Timestamp) -> Self {
        Self {
            id,
            author,
            body,
            sent_at,
        }
    }
}
