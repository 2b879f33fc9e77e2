//! # Filesystem Backend
//!
//! Snippets are kept as files named after the snippet id, with no
//! extension, directly in the root directory:
//!
//! ```text
//! {root}/D9L6MbPfE4
//! {root}/M5JQrinioh
//! ```
//!
//! There are no subdirectories and no metadata files. Because every key is
//! a validated [`SnippetId`], `root.join(id)` can never leave the root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snipstore_core::SnippetId;

use crate::backend::LocalStore;
use crate::error::StorageError;

/// A snippet store backed by a single flat directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is not created; use [`open()`](FsStore::open) at
    /// startup for that.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory (and its parents) if needed, then return
    /// a store rooted there.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::Io {
                op: "create directory",
                path: root.clone(),
                source,
            })?;
        Ok(Self { root })
    }

    /// Return the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the snippet with the given id.
    pub fn path_for(&self, id: &SnippetId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

#[async_trait]
impl LocalStore for FsStore {
    async fn get(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(id);
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                op: "read",
                path,
                source,
            }),
        }
    }

    async fn put(&self, id: &SnippetId, body: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(id);
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| StorageError::Io {
                op: "write",
                path,
                source,
            })
    }

    fn backend_name(&self) -> &str {
        "filesystem"
    }
}
