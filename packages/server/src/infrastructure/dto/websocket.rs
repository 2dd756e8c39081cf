//! WebSocket message DTOs for the signaling relay.
//!
//! Every frame is a JSON object `{"event": "<kebab-case name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{ChatMessage, ConnectionId, MediaKind, Member, ValueObjectError},
    usecase::{InboundEvent, NegotiationKind, Notification},
};

/// Frames sent by the browser
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[serde(rename_all_fields = "camelCase")]
pub enum ClientEvent {
    CreateRoom,
    JoinRoom { room_id: String, username: String },
    Offer { target: String, offer: Value },
    Answer { target: String, answer: Value },
    IceCandidate { target: String, candidate: Value },
    ToggleVideo { enabled: bool },
    ToggleAudio { enabled: bool },
    SendMessage { body: String },
}

impl ClientEvent {
    /// Convert into the router's event. Fails only on a malformed negotiation target.
    pub fn into_inbound(self) -> Result<InboundEvent, ValueObjectError> {
        let negotiation = |kind: NegotiationKind,
                           target: String,
                           payload: Value|
         -> Result<InboundEvent, ValueObjectError> {
            Ok(InboundEvent::Negotiation {
                kind,
                target: ConnectionId::try_from(target)?,
                payload,
            })
        };

        match self {
            Self::CreateRoom => Ok(InboundEvent::CreateRoom),
            Self::JoinRoom { room_id, username } => Ok(InboundEvent::JoinRoom {
                room_id,
                display_name: username,
            }),
            Self::Offer { target, offer } => negotiation(NegotiationKind::Offer, target, offer),
            Self::Answer { target, answer } => negotiation(NegotiationKind::Answer, target, answer),
            Self::IceCandidate { target, candidate } => {
                negotiation(NegotiationKind::IceCandidate, target, candidate)
            }
            Self::ToggleVideo { enabled } => Ok(InboundEvent::ToggleMedia {
                kind: MediaKind::Video,
                enabled,
            }),
            Self::ToggleAudio { enabled } => Ok(InboundEvent::ToggleMedia {
                kind: MediaKind::Audio,
                enabled,
            }),
            Self::SendMessage { body } => Ok(InboundEvent::SendMessage { body }),
        }
    }
}

/// Public view of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub id: String,
    pub username: String,
    pub video_enabled: bool,
    pub audio_enabled: bool,
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            id: member.connection_id.as_str().to_string(),
            username: member.display_name.clone(),
            video_enabled: member.video_enabled,
            audio_enabled: member.audio_enabled,
        }
    }
}

/// Chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageInfo {
    pub id: String,
    pub username: String,
    pub message: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

impl From<&ChatMessage> for ChatMessageInfo {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            username: message.author.clone(),
            message: message.body.clone(),
            timestamp: message.sent_at.to_rfc3339(),
        }
    }
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[serde(rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// First frame on every socket: the connection's own address
    Connected { connection_id: String },
    RoomCreated { room_id: String },
    UsersInRoom(Vec<MemberInfo>),
    ChatHistory(Vec<ChatMessageInfo>),
    UserJoined(MemberInfo),
    UserLeft(String),
    Offer { sender: String, offer: Value },
    Answer { sender: String, answer: Value },
    IceCandidate { sender: String, candidate: Value },
    UserVideoToggle { user_id: String, enabled: bool },
    UserAudioToggle { user_id: String, enabled: bool },
    NewMessage(ChatMessageInfo),
    Error(String),
}

impl From<Notification> for ServerEvent {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::RoomCreated(room_id) => Self::RoomCreated {
                room_id: room_id.into_string(),
            },
            Notification::UsersInRoom(members) => {
                Self::UsersInRoom(members.iter().map(MemberInfo::from).collect())
            }
            Notification::ChatHistory(messages) => {
                Self::ChatHistory(messages.iter().map(ChatMessageInfo::from).collect())
            }
            Notification::UserJoined(member) => Self::UserJoined(MemberInfo::from(&member)),
            Notification::UserLeft(connection_id) => Self::UserLeft(connection_id.into_string()),
            Notification::Negotiation {
                kind,
                sender,
                payload,
            } => {
                let sender = sender.into_string();
                match kind {
                    NegotiationKind::Offer => Self::Offer {
                        sender,
                        offer: payload,
                    },
                    NegotiationKind::Answer => Self::Answer {
                        sender,
                        answer: payload,
                    },
                    NegotiationKind::IceCandidate => Self::IceCandidate {
                        sender,
                        candidate: payload,
                    },
                }
            }
            Notification::MediaToggled {
                kind,
                connection_id,
                enabled,
            } => {
                let user_id = connection_id.into_string();
                match kind {
                    MediaKind::Video => Self::UserVideoToggle { user_id, enabled },
                    MediaKind::Audio => Self::UserAudioToggle { user_id, enabled },
                }
            }
            Notification::NewMessage(message) => Self::NewMessage(ChatMessageInfo::from(&message)),
            Notification::Error(reason) => Self::Error(reason),
        }
    }
}
