//! Irori terminal client.
//!
//! Joins the chat under a display name and sends messages from stdin.
//! `/upload <path>` shares a file, `/quit` leaves. Video calls need the
//! browser client; incoming calls are only announced here.
//!
//! Run with:
//! ```not_rust
//! cargo run -p irori-client -- --name Alice
//! cargo run -p irori-client -- -n Bob -c '#cc3366' -u ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;

use irori_client::{ClientOptions, run_client};
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-client", version)]
#[command(about = "Terminal chat client for the Irori relay", long_about = None)]
struct Args {
    /// Display name shown to other participants
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Chat color sent with every message (any CSS color)
    #[arg(short = 'c', long)]
    color: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();
    let name = args.name.trim().to_string();
    if name.is_empty() {
        eprintln!("--name must not be empty");
        std::process::exit(2);
    }

    let options = ClientOptions {
        url: args.url,
        name,
        color: args.color,
    };
    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
