//! # snipstore-storage: Content-Addressed Snippet Storage
//!
//! Persists snippets under their content-derived [`SnippetId`] and serves
//! them back, consulting the Go Playground for ids it has never seen.
//!
//! - [`LocalStore`]: byte get/put capability, with [`FsStore`] (flat
//!   directory) and [`MemoryStore`] implementations.
//! - [`RemoteSource`]: read-only fallback, implemented for
//!   [`PlaygroundClient`](snipstore_playground::PlaygroundClient) and
//!   [`MemoryStore`].
//! - [`SnippetStore`]: the façade exposing `store_snippet` and
//!   `load_snippet`.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use snipstore_storage::{MemoryStore, SnippetStore, StoreConfig};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let store = SnippetStore::new(Arc::new(MemoryStore::new()), None, StoreConfig::default());
//! let id = store.store_snippet(b"package main\n").await.unwrap();
//! assert_eq!(id.as_str(), "M5JQrinioh");
//! assert_eq!(store.load_snippet("M5JQrinioh").await.unwrap(), b"package main\n");
//! # });
//! ```

pub mod backend;
pub mod error;
pub mod fs;
pub mod memory;
pub mod remote;
pub mod store;

pub use backend::LocalStore;
pub use error::{ErrorKind, RemoteError, StorageError, StoreError};
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use remote::RemoteSource;
pub use snipstore_core::SnippetId;
pub use store::{SnippetStore, StoreConfig, DEFAULT_REMOTE_DEADLINE};
