//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::InboundEvent,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive routed events
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let hello = ServerEvent::Connected {
        connection_id: connection_id.as_str().to_string(),
    };
    match serde_json::to_string(&hello) {
        Ok(text) => {
            if let Err(e) = sender.send(Message::Text(text.into())).await {
                tracing::error!("Failed to greet '{}': {}", connection_id, e);
                return;
            }
        }
        Err(e) => {
            tracing::error!("Failed to serialize greeting: {}", e);
            return;
        }
    }

    state.hub.register(connection_id.clone(), tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if let Some(event) = parse_frame(&connection_id_clone, text.as_str()) {
                        state_clone.dispatch(connection_id_clone.clone(), event);
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward routed events to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.hub.unregister(&connection_id).await;
    state.dispatch(connection_id.clone(), InboundEvent::Disconnect);
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Decode one text frame. Malformed frames are logged and skipped.
fn parse_frame(connection_id: &ConnectionId, text: &str) -> Option<InboundEvent> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Unparseable frame from '{}': {}", connection_id, e);
            return None;
        }
    };

    match event.into_inbound() {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Invalid event from '{}': {}", connection_id, e);
            None
        }
    }
}
