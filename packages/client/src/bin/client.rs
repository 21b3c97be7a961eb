//! Relay command-line client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kotozute-client -- --id alice
//! ```

use clap::Parser;
use kotozute_client::ClientArgs;
use kotozute_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    setup_logger(env!("CARGO_BIN_NAME"), "info");

    if let Err(e) = kotozute_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
