//! Signaling relay for peer-to-peer audio/video rooms.
//!
//! Browsers discover each other inside a room, exchange WebRTC negotiation
//! messages through this server and share a small rolling chat log. Media
//! itself flows directly between peers.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
