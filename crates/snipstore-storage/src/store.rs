//! # Snippet Store Façade
//!
//! Composes the identifier codec, a [`LocalStore`], and an optional
//! [`RemoteSource`] into the two operations the HTTP layer consumes.
//!
//! ## Load Resolution
//!
//! ```text
//! Validate ──invalid──▶ InvalidId
//!    │
//!    ▼
//! CheckLocal ──hit──▶ return
//!    │ miss
//!    ▼
//! CheckRemote ──hit──▶ return
//!    │ miss            │ error / deadline
//!    ▼                 ▼
//! NotFound         Remote / RemoteTimeout
//! ```
//!
//! The local store always wins. A snippet shared here is served from here
//! even if the remote would also answer, and the remote is never contacted
//! for it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use snipstore_core::{SnippetId, MAX_SNIPPET_BYTES};

use crate::backend::LocalStore;
use crate::error::StoreError;
use crate::remote::RemoteSource;

/// Default bound on a single remote fetch (3 minutes).
pub const DEFAULT_REMOTE_DEADLINE: Duration = Duration::from_secs(180);

/// Explicit configuration for a [`SnippetStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long a load waits for the remote fallback before giving up.
    pub remote_deadline: Duration,
    /// Largest snippet body accepted by [`SnippetStore::store_snippet`].
    pub max_snippet_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            remote_deadline: DEFAULT_REMOTE_DEADLINE,
            max_snippet_bytes: MAX_SNIPPET_BYTES,
        }
    }
}

/// The snippet store.
///
/// Cheap to clone; clones share the same backends. Holds no mutable
/// in-process state, so concurrent requests need no coordination here.
#[derive(Clone)]
pub struct SnippetStore {
    local: Arc<dyn LocalStore>,
    remote: Option<Arc<dyn RemoteSource>>,
    config: StoreConfig,
}

impl fmt::Debug for SnippetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetStore")
            .field("local", &self.local.backend_name())
            .field(
                "remote",
                &self.remote.as_ref().map(|r| r.source_name().to_string()),
            )
            .field("config", &self.config)
            .finish()
    }
}

impl SnippetStore {
    /// Create a store over the given backends.
    ///
    /// With `remote` set to `None` the store runs offline: a local miss is
    /// reported as not found.
    pub fn new(
        local: Arc<dyn LocalStore>,
        remote: Option<Arc<dyn RemoteSource>>,
        config: StoreConfig,
    ) -> Self {
        Self {
            local,
            remote,
            config,
        }
    }

    /// Return the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether a remote fallback is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Store a snippet and return the id assigned to it.
    ///
    /// Storing the same bytes twice yields the same id and leaves the
    /// stored content unchanged.
    pub async fn store_snippet(&self, body: &[u8]) -> Result<SnippetId, StoreError> {
        if body.len() > self.config.max_snippet_bytes {
            return Err(StoreError::TooLarge {
                size: body.len(),
                limit: self.config.max_snippet_bytes,
            });
        }

        let id = SnippetId::for_content(body);
        self.local.put(&id, body).await?;
        tracing::info!(%id, bytes = body.len(), "stored snippet");
        Ok(id)
    }

    /// Load the snippet with the given id, waiting at most the configured
    /// remote deadline for the fallback.
    ///
    /// Returns [`StoreError::NotFound`] if no tier holds the snippet.
    pub async fn load_snippet(&self, id: &str) -> Result<Vec<u8>, StoreError> {
        self.load_snippet_within(id, self.config.remote_deadline).await
    }

    /// Load the snippet with the given id, waiting at most `deadline` for
    /// the remote fallback.
    ///
    /// The id is validated before any storage is touched. Dropping the
    /// returned future aborts an in-flight remote fetch.
    pub async fn load_snippet_within(
        &self,
        id: &str,
        deadline: Duration,
    ) -> Result<Vec<u8>, StoreError> {
        let id = SnippetId::parse(id)?;

        if let Some(body) = self.local.get(&id).await? {
            tracing::debug!(%id, backend = self.local.backend_name(), "served snippet from local store");
            return Ok(body);
        }

        let Some(remote) = &self.remote else {
            tracing::debug!(%id, "snippet not found locally and no remote configured");
            return Err(StoreError::NotFound(id));
        };

        let outcome = tokio::time::timeout(deadline, remote.fetch(&id)).await;
        match outcome {
            Ok(Ok(Some(body))) => {
                tracing::debug!(
                    %id,
                    legacy = id.is_legacy(),
                    source = remote.source_name(),
                    "served snippet from remote"
                );
                Ok(body)
            }
            Ok(Ok(None)) => {
                tracing::debug!(%id, "snippet not found in any tier");
                Err(StoreError::NotFound(id))
            }
            Ok(Err(source)) => {
                tracing::warn!(
                    %id,
                    source_name = remote.source_name(),
                    status = ?source.status(),
                    error = %source,
                    "remote fallback failed"
                );
                Err(StoreError::Remote { id, source })
            }
            Err(_elapsed) => {
                tracing::warn!(
                    %id,
                    source_name = remote.source_name(),
                    ?deadline,
                    "remote fallback exceeded deadline"
                );
                Err(StoreError::RemoteTimeout { id, deadline })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, RemoteError, StorageError};
    use crate::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // -- Stubs ----------------------------------------------------------------

    /// Remote stub that counts calls and answers with a fixed outcome.
    #[derive(Debug)]
    struct CountingRemote {
        calls: AtomicUsize,
        outcome: fn() -> Result<Option<Vec<u8>>, RemoteError>,
    }

    impl CountingRemote {
        fn new(outcome: fn() -> Result<Option<Vec<u8>>, RemoteError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteSource for CountingRemote {
        async fn fetch(&self, _id: &SnippetId) -> Result<Option<Vec<u8>>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }

        fn source_name(&self) -> &str {
            "counting"
        }
    }

    /// Local stub that counts reads and always fails.
    #[derive(Debug, Default)]
    struct BrokenLocal {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl LocalStore for BrokenLocal {
        async fn get(&self, _id: &SnippetId) -> Result<Option<Vec<u8>>, StorageError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Backend("disk on fire".into()))
        }

        async fn put(&self, _id: &SnippetId, _body: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Backend("disk on fire".into()))
        }

        fn backend_name(&self) -> &str {
            "broken"
        }
    }

    /// Remote stub that never answers and records when its future is dropped.
    #[derive(Debug, Default)]
    struct HangingRemote {
        started: tokio::sync::Notify,
        dropped: Arc<AtomicBool>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl RemoteSource for HangingRemote {
        async fn fetch(&self, _id: &SnippetId) -> Result<Option<Vec<u8>>, RemoteError> {
            let _flag = DropFlag(Arc::clone(&self.dropped));
            self.started.notify_one();
            std::future::pending().await
        }

        fn source_name(&self) -> &str {
            "hanging"
        }
    }

    fn store_with(local: MemoryStore, remote: Option<Arc<dyn RemoteSource>>) -> SnippetStore {
        SnippetStore::new(Arc::new(local), remote, StoreConfig::default())
    }

    // -- StoreSnippet ---------------------------------------------------------

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let store = store_with(MemoryStore::new(), None);
        let body = b"package main\n\nfunc main() {}\n";

        let id = store.store_snippet(body).await.unwrap();
        assert_eq!(id, "eYTf2Xlwf6");
        assert_eq!(store.load_snippet(id.as_str()).await.unwrap(), body);
    }

    #[tokio::test]
    async fn storing_twice_is_idempotent() {
        let local = MemoryStore::new();
        let store = store_with(local.clone(), None);

        let first = store.store_snippet(b"hello, world").await.unwrap();
        let second = store.store_snippet(b"hello, world").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(local.len(), 1);
        assert_eq!(store.load_snippet(first.as_str()).await.unwrap(), b"hello, world");
    }

    #[tokio::test]
    async fn store_rejects_oversized_body() {
        let local = MemoryStore::new();
        let store = store_with(local.clone(), None);
        let body = vec![b'x'; MAX_SNIPPET_BYTES + 1];

        let err = store.store_snippet(&body).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::TooLarge { size, limit } if size == MAX_SNIPPET_BYTES + 1 && limit == MAX_SNIPPET_BYTES
        ));
        assert!(local.is_empty());
    }

    #[tokio::test]
    async fn store_accepts_body_at_ceiling() {
        let store = store_with(MemoryStore::new(), None);
        let body = vec![0u8; MAX_SNIPPET_BYTES];
        let id = store.store_snippet(&body).await.unwrap();
        assert_eq!(store.load_snippet(id.as_str()).await.unwrap().len(), MAX_SNIPPET_BYTES);
    }

    #[tokio::test]
    async fn store_propagates_storage_failure() {
        let store = SnippetStore::new(Arc::new(BrokenLocal::default()), None, StoreConfig::default());
        let err = store.store_snippet(b"body").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
    }

    // -- LoadSnippet: validation ---------------------------------------------

    #[tokio::test]
    async fn invalid_id_never_touches_storage() {
        let local = Arc::new(BrokenLocal::default());
        let remote = CountingRemote::new(|| Ok(Some(b"x".to_vec())));
        let store = SnippetStore::new(local.clone(), Some(remote.clone()), StoreConfig::default());

        for bad in ["../../file", "Abc", "Abc?q=1235", "Heya世界"] {
            let err = store.load_snippet(bad).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "{bad}");
        }
        assert_eq!(local.reads.load(Ordering::SeqCst), 0);
        assert_eq!(remote.calls(), 0);
    }

    // -- LoadSnippet: tier ordering ------------------------------------------

    #[tokio::test]
    async fn local_hit_never_contacts_remote() {
        let local = MemoryStore::new();
        let id = local.insert(b"local copy");
        let remote = CountingRemote::new(|| Ok(Some(b"remote copy".to_vec())));
        let store = store_with(local, Some(remote.clone()));

        assert_eq!(store.load_snippet(id.as_str()).await.unwrap(), b"local copy");
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn local_miss_falls_back_to_remote() {
        let remote = CountingRemote::new(|| Ok(Some(b"from the playground".to_vec())));
        let store = store_with(MemoryStore::new(), Some(remote.clone()));

        let body = store.load_snippet("D9L6MbPfE4").await.unwrap();
        assert_eq!(body, b"from the playground");
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn remote_hits_are_not_written_locally() {
        let local = MemoryStore::new();
        let remote = CountingRemote::new(|| Ok(Some(b"remote".to_vec())));
        let store = store_with(local.clone(), Some(remote.clone()));

        store.load_snippet("D9L6MbPfE4").await.unwrap();
        store.load_snippet("D9L6MbPfE4").await.unwrap();
        assert!(local.is_empty());
        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test]
    async fn legacy_ids_resolve_through_remote() {
        let remote = MemoryStore::new();
        remote.insert_with_id(SnippetId::parse("N_M_YelfGeR").unwrap(), "package legacy");
        let store = store_with(MemoryStore::new(), Some(Arc::new(remote)));

        assert_eq!(store.load_snippet("N_M_YelfGeR").await.unwrap(), b"package legacy");
    }

    // -- LoadSnippet: not found vs failure -----------------------------------

    #[tokio::test]
    async fn double_miss_is_not_found() {
        let remote = CountingRemote::new(|| Ok(None));
        let store = store_with(MemoryStore::new(), Some(remote.clone()));

        let err = store.load_snippet("D9L6MbPfE4").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, StoreError::NotFound(id) if id == "D9L6MbPfE4"));
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn offline_miss_is_not_found() {
        let store = store_with(MemoryStore::new(), None);
        assert!(!store.has_remote());
        let err = store.load_snippet("D9L6MbPfE4").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn remote_failure_is_not_not_found() {
        let remote = CountingRemote::new(|| Err(RemoteError::Other("bad gateway".into())));
        let store = store_with(MemoryStore::new(), Some(remote));

        let err = store.load_snippet("D9L6MbPfE4").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteFailure);
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn local_failure_does_not_fall_back() {
        let remote = CountingRemote::new(|| Ok(Some(b"remote".to_vec())));
        let store = SnippetStore::new(
            Arc::new(BrokenLocal::default()),
            Some(remote.clone()),
            StoreConfig::default(),
        );

        let err = store.load_snippet("D9L6MbPfE4").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert_eq!(remote.calls(), 0);
    }

    // -- LoadSnippet: deadline and cancellation ------------------------------

    #[tokio::test]
    async fn hung_remote_times_out_at_deadline() {
        let remote = Arc::new(HangingRemote::default());
        let store = store_with(MemoryStore::new(), Some(remote.clone()));

        let started = std::time::Instant::now();
        let err = store
            .load_snippet_within("D9L6MbPfE4", Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RemoteTimeout { deadline, .. } if deadline == Duration::from_millis(50)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(remote.dropped.load(Ordering::SeqCst), "fetch future must be dropped");
    }

    #[tokio::test(start_paused = true)]
    async fn configured_deadline_applies_to_load_snippet() {
        let remote = Arc::new(HangingRemote::default());
        let config = StoreConfig {
            remote_deadline: Duration::from_secs(180),
            ..StoreConfig::default()
        };
        let store = SnippetStore::new(Arc::new(MemoryStore::new()), Some(remote), config);

        let err = store.load_snippet("D9L6MbPfE4").await.unwrap_err();
        assert!(matches!(err, StoreError::RemoteTimeout { deadline, .. } if deadline == Duration::from_secs(180)));
    }

    #[tokio::test]
    async fn dropping_the_load_aborts_the_remote_fetch() {
        let remote = Arc::new(HangingRemote::default());
        let store = store_with(MemoryStore::new(), Some(remote.clone()));

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.load_snippet("D9L6MbPfE4").await }
        });

        remote.started.notified().await;
        assert!(!remote.dropped.load(Ordering::SeqCst));

        task.abort();
        let joined = task.await;
        assert!(joined.unwrap_err().is_cancelled());
        assert!(remote.dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn default_config_matches_service_limits() {
        let config = StoreConfig::default();
        assert_eq!(config.remote_deadline, Duration::from_secs(180));
        assert_eq!(config.max_snippet_bytes, 1024 * 1024);
    }

    #[test]
    fn debug_names_backends() {
        let store = store_with(MemoryStore::new(), Some(Arc::new(MemoryStore::new())));
        let rendered = format!("{store:?}");
        assert!(rendered.contains("memory"));
    }
}
