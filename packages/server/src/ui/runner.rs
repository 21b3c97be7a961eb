//! Server startup.

use std::{future::Future, io, sync::Arc};

use thiserror::Error;
use tokio::net::TcpListener;

use super::{router::build_router, signal::shutdown_signal, state::AppState};
use crate::{config::ServerConfig, infrastructure::registry::InMemoryRegistry};

/// Errors that stop the server as a whole.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// One registry is created here and shared by every connection.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let state = Arc::new(AppState::new(Arc::new(InMemoryRegistry::new()), &config));

    tracing::info!(
        "Relay listening on {} (outbound capacity {})",
        addr,
        config.outbound_capacity
    );
    serve(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}
