//! # Remote Fallback Capability
//!
//! Read-only source consulted after a local miss. The production
//! implementation is the Go Playground client; tests substitute
//! [`MemoryStore`](crate::MemoryStore) or a purpose-built stub.

use std::fmt;

use async_trait::async_trait;
use snipstore_core::SnippetId;
use snipstore_playground::PlaygroundClient;

use crate::error::RemoteError;

/// A read-only mapping from snippet id to bytes outside this store's
/// control.
///
/// The returned future must be cancel-safe: the façade bounds it with a
/// deadline and drops it when the caller goes away.
#[async_trait]
pub trait RemoteSource: Send + Sync + fmt::Debug {
    /// Fetch the snippet with the given id.
    ///
    /// Returns `Ok(None)` when the source does not hold the id.
    async fn fetch(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, RemoteError>;

    /// Human-readable name of this source, for logs.
    fn source_name(&self) -> &str;
}

#[async_trait]
impl RemoteSource for PlaygroundClient {
    async fn fetch(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, RemoteError> {
        Ok(PlaygroundClient::fetch(self, id).await?)
    }

    fn source_name(&self) -> &str {
        "go-playground"
    }
}
