//! Signaling router.
//!
//! Maps one inbound event from one connection onto registry operations and
//! the resulting deliveries. Holds no state between events; every handler
//! re-reads the registry.

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository};

use super::{
    create_room::CreateRoomUseCase,
    disconnect_member::DisconnectMemberUseCase,
    error::RouteError,
    event::InboundEvent,
    join_room::JoinRoomUseCase,
    notification::{Delivery, Notification, ROOM_NOT_FOUND_REASON},
    relay_signal::RelaySignalUseCase,
    send_message::SendMessageUseCase,
    toggle_media::ToggleMediaUseCase,
};

/// Dispatches inbound events to their use cases
#[derive(Clone)]
pub struct SignalingRouter {
    repository: Arc<dyn RoomRepository>,
}

impl SignalingRouter {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Handle one event to completion.
    ///
    /// Deliveries are returned in the order they must be sent. Errors never
    /// escape: an unknown room on join becomes an `error` delivery to the
    /// requester, everything else is dropped.
    pub async fn handle(&self, from: &ConnectionId, event: InboundEvent) -> Vec<Delivery> {
        match self.route(from, event).await {
            Ok(deliveries) => deliveries,
            Err(RouteError::RoomNotFound(room_id)) => {
                tracing::warn!(connection_id = %from, room_id = %room_id, "join against unknown room");
                vec![Delivery::new(
                    from.clone(),
                    Notification::Error(ROOM_NOT_FOUND_REASON.to_string()),
                )]
            }
            Err(error @ RouteError::NotBound(_)) => {
                tracing::debug!(connection_id = %from, %error, "event dropped");
                Vec::new()
            }
            Err(error) => {
                tracing::warn!(connection_id = %from, %error, "event dropped");
                Vec::new()
            }
        }
    }

    async fn route(
        &self,
        from: &ConnectionId,
        event: InboundEvent,
    ) -> Result<Vec<Delivery>, RouteError> {
        let repository = self.repository.clone();
        match event {
            InboundEvent::CreateRoom => Ok(CreateRoomUseCase::new(repository).execute(from).await),
            InboundEvent::JoinRoom {
                room_id,
                display_name,
            } => {
                JoinRoomUseCase::new(repository)
                    .execute(from, &room_id, display_name)
                    .await
            }
            InboundEvent::Negotiation {
                kind,
                target,
                payload,
            } => {
                RelaySignalUseCase::new(repository)
                    .execute(from, kind, target, payload)
                    .await
            }
            InboundEvent::ToggleMedia { kind, enabled } => {
                ToggleMediaUseCase::new(repository)
                    .execute(from, kind, enabled)
                    .await
            }
            InboundEvent::SendMessage { body } => {
                SendMessageUseCase::new(repository).execute(from, body).await
            }
            InboundEvent::Disconnect => DisconnectMemberUseCase::new(repository).execute(from).await,
        }
    }
}
