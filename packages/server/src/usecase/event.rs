//! Inbound events handed to the router by the transport.

use serde_json::Value;

use crate::domain::{ConnectionId, MediaKind};

/// Kind of a point-to-point negotiation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationKind {
    Offer,
    Answer,
    IceCandidate,
}

/// One discrete event from one connection
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    CreateRoom,
    JoinRoom {
        /// Raw room id as sent by the client; malformed ids are unknown rooms
        room_id: String,
        display_name: String,
    },
    Negotiation {
        kind: NegotiationKind,
        target: ConnectionId,
        /// Opaque, forwarded verbatim
        payload: Value,
    },
    ToggleMedia {
        kind: MediaKind,
        enabled: bool,
    },
    SendMessage {
        body: String,
    },
    /// Transport-originated; the connection is gone
    Disconnect,
}
