//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port, backed by a store the
//! test can also reach directly.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use reqwest::Client;
use roster::StudentStore;
use roster_server::{router, state::AppState};
use roster_test_utils::TestSetup;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub store: Arc<dyn StudentStore>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server over a fresh in-memory SQLite store.
    pub async fn spawn() -> Result<Self> {
        let setup = TestSetup::sqlite().await?;
        Self::spawn_with_store(setup.store).await
    }

    pub async fn spawn_with_store(store: Arc<dyn StudentStore>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state = AppState::with_store(store.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            store,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn students_url(&self) -> String {
        format!("{}/api/students", self.address)
    }

    pub fn student_url(&self, id: &str) -> String {
        format!("{}/api/students/{id}", self.address)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
