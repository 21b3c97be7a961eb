//! Direct-message relay over WebSocket.
//!
//! Clients connect to `/ws?id=<identity>` and exchange
//! `{"to", "from", "message"}` frames addressed by identity. The registry
//! tracks live sessions and routes between them.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run_server;
