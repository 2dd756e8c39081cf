//! Server runner: route table and listener.

use std::{path::Path, sync::Arc};

use axum::{Router, http::Method, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    domain::RoomRepository,
    error::ServerError,
    infrastructure::repository::InMemoryRoomRepository,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    state::AppState,
};

/// Build the application router.
///
/// `/` and `/room/{room_id}` serve the landing and room documents from
/// `public_dir`; any other unmatched path is looked up there as a static file.
pub fn build_app(state: Arc<AppState>, public_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .route("/ws", get(websocket_handler))
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service(
            "/room/{room_id}",
            ServeFile::new(public_dir.join("room.html")),
        )
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let repository: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::new());
    let state = Arc::new(AppState::new(repository));
    let app = build_app(state, &config.public_dir);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Serving documents from {}", config.public_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
