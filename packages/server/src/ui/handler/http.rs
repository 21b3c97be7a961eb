//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{HealthDto, RosterEntryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Live sessions, oldest first
pub async fn get_roster(State(state): State<Arc<AppState>>) -> Json<Vec<RosterEntryDto>> {
    let members = state.registry.members().await;
    Json(members.into_iter().map(RosterEntryDto::from).collect())
}

/// Serve the browser page from disk
pub async fn serve_html(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.html_path).await {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", state.html_path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
