//! WebSocket upgrade handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State, ws::WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::stream::StreamExt;
use serde::Deserialize;

use crate::{
    domain::Identity,
    ui::{session::ClientSession, state::AppState},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Missing `id` means the empty identity
    #[serde(default)]
    pub id: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let identity = Identity::from(query.id);
    tracing::info!(identity = %identity, "WebSocket upgrade requested");

    let failed_identity = identity.clone();
    ws.on_failed_upgrade(move |e| {
        tracing::warn!(identity = %failed_identity, "WebSocket upgrade failed: {}", e);
    })
    .on_upgrade(move |socket| async move {
        let session = ClientSession::open(&state, identity).await;
        let (sink, stream) = socket.split();
        session.run(sink, stream).await;
    })
}
