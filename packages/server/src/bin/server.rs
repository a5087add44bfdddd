//! Irori relay server.
//!
//! Serves the browser client, relays chat, file notices and video-call
//! signaling over WebSocket, and stores uploaded files.
//!
//! Run with:
//! ```not_rust
//! cargo run -p irori-server
//! cargo run -p irori-server -- --host 127.0.0.1 --port 3000 --upload-dir /tmp/irori
//! ```

use clap::Parser;
use irori_server::{
    config::{ServerArgs, ServerConfig},
    ui::Server,
};
use irori_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let server = match Server::from_config(&config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(listener).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
