//! Test fixtures: an in-process server on an ephemeral port.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use kotozute_server::{
    ServerConfig,
    domain::{Identity, Registry},
    infrastructure::registry::InMemoryRegistry,
    ui::{serve, state::AppState},
};
use tokio::{net::TcpListener, sync::oneshot};

pub struct TestServer {
    addr: SocketAddr,
    registry: Arc<InMemoryRegistry>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let registry = Arc::new(InMemoryRegistry::new());
        let state = Arc::new(AppState::new(registry.clone(), &config));
        let (shutdown, signal) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, state, async move {
            let _ = signal.await;
        }));

        Self {
            addr,
            registry,
            shutdown: Some(shutdown),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, id: &str) -> String {
        format!("ws://{}/ws?id={}", self.addr, id)
    }

    pub fn ws_url_without_id(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn registry(&self) -> &InMemoryRegistry {
        &self.registry
    }

    /// Poll until the live identities equal `expected` (any order).
    ///
    /// Registration happens after the upgrade response is sent, so a client
    /// can finish its handshake before the server has registered it.
    pub async fn wait_for_roster(&self, expected: &[&str]) {
        let mut expected: Vec<Identity> = expected.iter().map(|id| Identity::from(*id)).collect();
        expected.sort();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let current = self.registry.list_identities().await.unwrap_or_default();
            if current == expected {
                return;
            }
            if tokio::time::Instant::now() > deadline {
                panic!("roster never became {expected:?}; last seen {current:?}");
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
