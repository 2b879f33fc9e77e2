//! # Local Store Capability
//!
//! The byte-oriented get/put interface the façade persists snippets
//! through. Implementations:
//!
//! - [`FsStore`](crate::FsStore): one file per snippet in a flat directory.
//! - [`MemoryStore`](crate::MemoryStore): a process-local map, for tests
//!   and ephemeral deployments.
//!
//! Keys are [`SnippetId`] values, so a backend never sees an unvalidated
//! key and may use it directly as a file or object name.

use std::fmt;

use async_trait::async_trait;
use snipstore_core::SnippetId;

use crate::error::StorageError;

/// A flat, create-once/read-many byte store keyed by snippet id.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// request tasks behind an `Arc`. The trait is object-safe to support
/// runtime backend selection.
#[async_trait]
pub trait LocalStore: Send + Sync + fmt::Debug {
    /// Read the snippet stored under `id`.
    ///
    /// Returns `Ok(None)` when no entry exists. Every other failure is an
    /// error.
    async fn get(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write `body` under `id`, creating or overwriting the entry.
    ///
    /// Concurrent writers of the same id write identical bytes, so no
    /// coordination is required.
    async fn put(&self, id: &SnippetId, body: &[u8]) -> Result<(), StorageError>;

    /// Human-readable name of this backend, for logs.
    fn backend_name(&self) -> &str;
}
