//! # Application State
//!
//! The shared state handed to every request handler, and the logic that
//! builds it from configuration at startup.

use crate::config::{AppConfig, StoreKind};
use roster::{MemoryStore, SqliteStore, StudentStore};
use std::{path::Path, sync::Arc};
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The canonical student collection.
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    /// Wraps an already-built store, e.g. one shared with a test.
    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }
}

/// Opens the store the configuration selects and wraps it in `AppState`.
pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn StudentStore> = match config.store {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Sqlite => {
            if let Some(parent) = Path::new(&config.db_url).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Arc::new(SqliteStore::new(&config.db_url).await?)
        }
    };
    info!(backend = store.name(), "Student store ready.");

    Ok(AppState::with_store(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn builds_the_configured_backend() -> anyhow::Result<()> {
        let memory = AppConfig {
            port: 0,
            db_url: String::new(),
            store: StoreKind::Memory,
        };
        assert_eq!(build_app_state(&memory).await?.store.name(), "memory");

        let dir = tempdir()?;
        let db_path = dir.path().join("nested/roster.db");
        let sqlite = AppConfig {
            port: 0,
            db_url: db_path.to_string_lossy().into_owned(),
            store: StoreKind::Sqlite,
        };
        let state = build_app_state(&sqlite).await?;
        assert_eq!(state.store.name(), "SQLite");
        assert!(db_path.parent().is_some_and(Path::exists));
        Ok(())
    }
}
