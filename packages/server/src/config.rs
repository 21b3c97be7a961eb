//! Server configuration (command-line arguments).

use std::path::PathBuf;

use clap::Parser;

/// Message relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "kotozute-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Per-session outbound queue capacity; messages to a full queue are dropped
    #[arg(long, default_value_t = 64, value_parser = parse_capacity)]
    pub outbound_capacity: usize,

    /// HTML page served at `/`
    #[arg(long, default_value = "home.html")]
    pub html_path: PathBuf,

    /// Log level for this crate when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            outbound_capacity: 64,
            html_path: PathBuf::from("home.html"),
            log_level: "debug".to_string(),
        }
    }
}

fn parse_capacity(value: &str) -> Result<usize, String> {
    let capacity: usize = value
        .parse()
        .map_err(|e| format!("invalid capacity '{value}': {e}"))?;
    if capacity == 0 {
        return Err("capacity must be at least 1".to_string());
    }
    Ok(capacity)
}
