//! Outbound notifications produced by the router.

use serde_json::Value;

use super::event::NegotiationKind;
use crate::domain::{ChatMessage, ConnectionId, MediaKind, Member, RoomId};

/// Message sent to the requester when a join names an unknown room
pub const ROOM_NOT_FOUND_REASON: &str = "Room not found";

/// What a recipient is told
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Reply to `create-room`
    RoomCreated(RoomId),
    /// Members already in the room, excluding the recipient
    UsersInRoom(Vec<Member>),
    /// Full chat history in send order
    ChatHistory(Vec<ChatMessage>),
    UserJoined(Member),
    UserLeft(ConnectionId),
    Negotiation {
        kind: NegotiationKind,
        sender: ConnectionId,
        payload: Value,
    },
    MediaToggled {
        kind: MediaKind,
        connection_id: ConnectionId,
        enabled: bool,
    },
    NewMessage(ChatMessage),
    Error(String),
}

/// A notification addressed to a single connection
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub notification: Notification,
}

impl Delivery {
    pub fn new(to: ConnectionId, notification: Notification) -> Self {
        Self { to, notification }
    }

    /// One delivery per recipient, skipping `except`
    pub fn broadcast(
        recipients: &[ConnectionId],
        except: Option<&ConnectionId>,
        notification: &Notification,
    ) -> Vec<Self> {
        recipients
            .iter()
            .filter(|id| Some(*id) != except)
            .map(|id| Self::new(id.clone(), notification.clone()))
            .collect()
    }
}
