//! Server state shared by every handler.

use std::{path::PathBuf, sync::Arc};

use crate::{config::ServerConfig, domain::Registry};

/// Shared application state
pub struct AppState {
    /// Registry（メンバー表の抽象化）
    pub registry: Arc<dyn Registry>,
    /// Capacity of each session's outbound queue
    pub outbound_capacity: usize,
    /// HTML page served at `/`
    pub html_path: PathBuf,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>, config: &ServerConfig) -> Self {
        Self {
            registry,
            outbound_capacity: config.outbound_capacity,
            html_path: config.html_path.clone(),
        }
    }
}
