//! Direct-message relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kotozute-server -- --port 8080
//! ```

use clap::Parser;
use kotozute_server::ServerConfig;
use kotozute_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = kotozute_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
