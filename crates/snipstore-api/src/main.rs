//! # snipstore: Binary Entry Point
//!
//! Starts the snippet HTTP service. Snippets are persisted under
//! `--storage-dir`; unknown ids fall back to the Go Playground unless
//! `--offline` is given.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use clap::Parser;
use snipstore_api::state::{AppConfig, AppState, DEFAULT_ALLOW_ORIGIN};
use snipstore_playground::{PlaygroundClient, PlaygroundConfig};
use snipstore_storage::{FsStore, RemoteSource, SnippetStore, StoreConfig, DEFAULT_REMOTE_DEADLINE};

/// Store and serve GopherJS playground snippets.
#[derive(Debug, Parser)]
#[command(name = "snipstore", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long = "http", env = "SNIPSTORE_HTTP", default_value = "0.0.0.0:8080")]
    http: SocketAddr,

    /// Directory snippets are stored in [default: $TMPDIR/gopherjs_snippets].
    #[arg(long, env = "SNIPSTORE_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Value of the Access-Control-Allow-Origin response header.
    #[arg(long, env = "SNIPSTORE_ALLOW_ORIGIN", default_value = DEFAULT_ALLOW_ORIGIN)]
    allow_origin: String,

    /// Seconds to wait for the Go Playground before giving up.
    #[arg(long, env = "SNIPSTORE_REMOTE_DEADLINE_SECS", default_value_t = DEFAULT_REMOTE_DEADLINE.as_secs())]
    remote_deadline_secs: u64,

    /// Never consult the Go Playground for unknown ids.
    #[arg(long, env = "SNIPSTORE_OFFLINE")]
    offline: bool,
}

impl Args {
    fn into_config(self) -> Result<AppConfig, Box<dyn std::error::Error>> {
        let allow_origin = HeaderValue::from_str(&self.allow_origin)
            .map_err(|e| format!("invalid --allow-origin {:?}: {e}", self.allow_origin))?;
        Ok(AppConfig {
            listen: self.http,
            storage_dir: self
                .storage_dir
                .unwrap_or_else(|| std::env::temp_dir().join("gopherjs_snippets")),
            allow_origin,
            remote_fallback: !self.offline,
            store: StoreConfig {
                remote_deadline: Duration::from_secs(self.remote_deadline_secs),
                ..StoreConfig::default()
            },
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;

    let local = FsStore::open(config.storage_dir.clone()).await.map_err(|e| {
        tracing::error!("Failed to open snippet directory: {e}");
        e
    })?;
    tracing::info!(dir = %config.storage_dir.display(), "snippet directory ready");

    let remote: Option<Arc<dyn RemoteSource>> = if config.remote_fallback {
        let playground = PlaygroundConfig::from_env()?.outlasting(config.store.remote_deadline);
        let client = PlaygroundClient::new(playground)?;
        tracing::info!(base_url = %client.base_url(), "Go Playground fallback enabled");
        Some(Arc::new(client))
    } else {
        tracing::warn!("Go Playground fallback disabled; unknown ids will return 404");
        None
    };

    let store = SnippetStore::new(Arc::new(local), remote, config.store);
    let addr = config.listen;
    let app = snipstore_api::app(AppState::with_store(config, store));

    tracing::info!("snipstore listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
