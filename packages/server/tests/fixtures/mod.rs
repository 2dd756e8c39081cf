//! Shared fixtures for integration tests.
//!
//! Starts the real application on an ephemeral port and provides a small
//! WebSocket client speaking the `{"event", "data"}` frame format.

#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use callroom_server::{
    domain::RoomRepository,
    infrastructure::repository::InMemoryRoomRepository,
    ui::{AppState, build_app},
};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Application server running in a background task
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let repository: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::new());
        let state = Arc::new(AppState::new(repository));
        let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public");
        let app = build_app(state, &public_dir);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Poll the room detail endpoint until it returns `status` or the retries run out
    pub async fn wait_for_room_status(&self, room_id: &str, status: u16) -> bool {
        let client = reqwest::Client::new();
        for _ in 0..100 {
            let response = client
                .get(format!("{}/api/rooms/{}", self.base_url(), room_id))
                .send()
                .await
                .expect("Failed to send request");
            if response.status().as_u16() == status {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client for one browser session
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// Connection id assigned by the server
    pub id: String,
}

impl WsClient {
    /// Connect and consume the `connected` greeting
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        let mut client = Self {
            stream,
            id: String::new(),
        };
        let data = client.expect_event("connected").await;
        client.id = data["connectionId"]
            .as_str()
            .expect("connectionId should be a string")
            .to_string();
        client
    }

    pub async fn send(&mut self, event: &str, data: Value) {
        let frame = json!({"event": event, "data": data});
        self.stream
            .send(Message::text(frame.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send frame");
    }

    /// Next JSON frame
    pub async fn recv(&mut self) -> Value {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Stream ended")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
        }
    }

    /// Next frame must be `event`; returns its data
    pub async fn expect_event(&mut self, event: &str) -> Value {
        let frame = self.recv().await;
        assert_eq!(frame["event"], event, "unexpected frame: {frame}");
        frame["data"].clone()
    }

    /// Assert nothing arrives within a short window
    pub async fn expect_silence(&mut self) {
        let result = tokio::time::timeout(Duration::from_millis(200), self.stream.next()).await;
        assert!(result.is_err(), "unexpected frame: {result:?}");
    }

    pub async fn create_room(&mut self) -> String {
        self.send_raw(r#"{"event":"create-room"}"#).await;
        let data = self.expect_event("room-created").await;
        data["roomId"].as_str().expect("roomId").to_string()
    }

    /// Join and return (users-in-room, chat-history)
    pub async fn join(&mut self, room_id: &str, username: &str) -> (Value, Value) {
        self.send("join-room", json!({"roomId": room_id, "username": username}))
            .await;
        let users = self.expect_event("users-in-room").await;
        let history = self.expect_event("chat-history").await;
        (users, history)
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.ok();
    }
}
