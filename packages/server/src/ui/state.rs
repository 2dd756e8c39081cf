//! Server state and connection management.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, RoomRepository},
    infrastructure::dto::websocket::ServerEvent,
    usecase::{Delivery, InboundEvent, SignalingRouter},
};

use super::dispatcher::{Envelope, spawn_dispatcher};

/// Live connections and their outbound channels.
///
/// Sending to an unknown or closed connection is a silent no-op.
#[derive(Default)]
pub struct ConnectionHub {
    connections: Mutex<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound channel
    pub async fn register(&self, connection_id: ConnectionId, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id, sender);
    }

    pub async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
    }

    pub async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Queue a text frame for one connection. Returns false if it was not delivered.
    pub async fn send(&self, connection_id: &ConnectionId, text: String) -> bool {
        let connections = self.connections.lock().await;
        match connections.get(connection_id) {
            Some(sender) => sender.send(text).is_ok(),
            None => false,
        }
    }

    /// Serialize and send deliveries in order
    pub async fn deliver(&self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            let event = ServerEvent::from(delivery.notification);
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to serialize event for '{}': {}", delivery.to, e);
                    continue;
                }
            };
            if !self.send(&delivery.to, text).await {
                tracing::debug!("Recipient '{}' is not connected, dropping event", delivery.to);
            }
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
    /// Outbound channels of live connections
    pub hub: Arc<ConnectionHub>,
    /// Inbound events, consumed one at a time by the dispatcher
    events: mpsc::UnboundedSender<Envelope>,
}

impl AppState {
    /// Build the state and spawn the dispatcher task. Must run inside a tokio runtime.
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        let hub = Arc::new(ConnectionHub::new());
        let router = SignalingRouter::new(repository.clone());
        let events = spawn_dispatcher(router, hub.clone());
        Self {
            repository,
            hub,
            events,
        }
    }

    /// Hand an event to the dispatcher
    pub fn dispatch(&self, from: ConnectionId, event: InboundEvent) {
        if self.events.send(Envelope { from, event }).is_err() {
            tracing::error!("Dispatcher is gone, dropping event");
        }
    }
}
