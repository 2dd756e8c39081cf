//! HTTP API response DTOs for the signaling relay.

use serde::{Deserialize, Serialize};

use crate::domain::Room;

use super::websocket::MemberInfo;

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
    pub created_at: String, // ISO 8601
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            member_count: room.members.len(),
            created_at: room.created_at.to_rfc3339(),
        }
    }
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<MemberInfo>,
    pub message_count: usize,
    pub created_at: String, // ISO 8601
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            members: room.members.iter().map(MemberInfo::from).collect(),
            message_count: room.history.len(),
            created_at: room.created_at.to_rfc3339(),
        }
    }
}
