//! # In-Memory Backend
//!
//! A thread-safe, cloneable map from snippet id to bytes. Clones share the
//! same map. Used by tests for both tiers and by deployments that do not
//! need snippets to survive a restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use snipstore_core::SnippetId;

use crate::backend::LocalStore;
use crate::error::{RemoteError, StorageError};
use crate::remote::RemoteSource;

/// In-memory snippet store.
///
/// The lock is `parking_lot`, not `tokio::sync`: it is never held across
/// an `.await` point.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<SnippetId, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snippet under its derived id, returning the id.
    pub fn insert(&self, body: &[u8]) -> SnippetId {
        let id = SnippetId::for_content(body);
        self.data.write().insert(id.clone(), body.to_vec());
        id
    }

    /// Insert bytes under an explicit id.
    pub fn insert_with_id(&self, id: SnippetId, body: impl Into<Vec<u8>>) {
        self.data.write().insert(id, body.into());
    }

    /// Check if an entry exists.
    pub fn contains(&self, id: &SnippetId) -> bool {
        self.data.read().contains_key(id)
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.read().get(id).cloned())
    }

    async fn put(&self, id: &SnippetId, body: &[u8]) -> Result<(), StorageError> {
        self.data.write().insert(id.clone(), body.to_vec());
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl RemoteSource for MemoryStore {
    async fn fetch(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, RemoteError> {
        Ok(self.data.read().get(id).cloned())
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        let id = a.insert(b"package main");

        assert!(b.contains(&id));
        assert_eq!(
            LocalStore::get(&b, &id).await.unwrap().as_deref(),
            Some(&b"package main"[..])
        );
        assert_eq!(b.len(), 1);
    }

    #[tokio::test]
    async fn put_and_get_through_trait() {
        let store = MemoryStore::new();
        let id = SnippetId::parse("D9L6MbPfE4").unwrap();

        assert!(LocalStore::get(&store, &id).await.unwrap().is_none());
        store.put(&id, b"body").await.unwrap();
        assert_eq!(
            LocalStore::get(&store, &id).await.unwrap().as_deref(),
            Some(&b"body"[..])
        );
    }

    #[tokio::test]
    async fn serves_as_remote_source() {
        let store = MemoryStore::new();
        let id = store.insert(b"remote body");

        assert_eq!(
            store.fetch(&id).await.unwrap().as_deref(),
            Some(&b"remote body"[..])
        );
        let missing = SnippetId::parse("N_M_YelfGeR").unwrap();
        assert!(store.fetch(&missing).await.unwrap().is_none());
    }

    #[test]
    fn insert_uses_derived_id() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        let id = store.insert(b"hello, world");
        assert_eq!(id, "u3YDTZm-IY");
    }
}
