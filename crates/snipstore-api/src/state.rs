//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Everything here is fixed at startup; the
//! only persistent state lives behind the [`SnippetStore`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use snipstore_storage::{MemoryStore, SnippetStore, StoreConfig};

/// Default origin allowed to call the API from a browser.
pub const DEFAULT_ALLOW_ORIGIN: &str = "http://gopherjs.org";

/// Server configuration, built once from flags in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    pub listen: SocketAddr,
    /// Directory snippets are persisted in.
    pub storage_dir: PathBuf,
    /// Value of `Access-Control-Allow-Origin` on every response.
    pub allow_origin: HeaderValue,
    /// Whether to consult the Go Playground on a local miss.
    pub remote_fallback: bool,
    /// Store limits and deadlines.
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            storage_dir: std::env::temp_dir().join("gopherjs_snippets"),
            allow_origin: HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN),
            remote_fallback: true,
            store: StoreConfig::default(),
        }
    }
}

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The snippet store.
    pub store: SnippetStore,
    /// Server configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state around an already-built store.
    pub fn with_store(config: AppConfig, store: SnippetStore) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Create state backed by an in-memory store with no remote fallback.
    pub fn in_memory() -> Self {
        let config = AppConfig {
            remote_fallback: false,
            ..AppConfig::default()
        };
        let store = SnippetStore::new(Arc::new(MemoryStore::new()), None, config.store);
        Self::with_store(config, store)
    }
}
