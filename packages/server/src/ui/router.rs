//! Route table.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::{
    handler::{get_roster, health_check, serve_html, websocket_handler},
    state::AppState,
};

/// Build the application router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_html))
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/roster", get(get_roster))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
