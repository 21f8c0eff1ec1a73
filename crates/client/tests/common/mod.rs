//! # Common Test Utilities
//!
//! Spawns the real roster server on a random port over an in-memory store so
//! the client can be exercised end to end.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use roster::StudentStore;
use roster_client::{default_collator, ApiClient, FormRules, Synchronizer};
use roster_server::{router::create_router, state::AppState};
use roster_test_utils::TestSetup;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::oneshot};

pub struct TestServer {
    pub address: String,
    pub store: Arc<dyn StudentStore>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let store = TestSetup::memory().store;
        let app = create_router(AppState::with_store(store.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestServer] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            store,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// A synchronizer pointed at this server, with default collation and rules.
    pub fn synchronizer(&self) -> Synchronizer<ApiClient> {
        Synchronizer::new(
            ApiClient::new(self.address.clone()),
            default_collator(),
            FormRules::default(),
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
