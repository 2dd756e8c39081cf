//! Signaling relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin callroom-server -- --port 3000
//! ```

use callroom_server::ServerConfig;
use callroom_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = callroom_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
