//! UI layer: axum router, HTTP / WebSocket handlers and per-connection sessions.

pub mod handler;
pub mod router;
mod runner;
pub mod session;
mod signal;
pub mod state;

pub use router::build_router;
pub use runner::{ServerError, run_server, serve};
pub use signal::shutdown_signal;
