//! # Storage Error Types
//!
//! Structured errors for the local backends, the remote fallback, and the
//! store façade. Uses `thiserror` for ergonomic error definitions with
//! diagnostic context.
//!
//! "Not found" is deliberately not a [`StorageError`] or [`RemoteError`]:
//! both tiers report absence as `Ok(None)`, and only the façade turns a
//! miss on every tier into [`StoreError::NotFound`].

use std::path::PathBuf;
use std::time::Duration;

use snipstore_core::{IdError, SnippetId};
use snipstore_playground::PlaygroundError;
use thiserror::Error;

/// Failure of a local backend other than absence.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem operation failed (permissions, disk full, ...).
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// A backend without an I/O path reported a failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Failure of a remote source other than absence.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The Go Playground could not be reached or answered unexpectedly.
    #[error(transparent)]
    Playground(#[from] PlaygroundError),

    /// Any other remote source failed.
    #[error("remote source error: {0}")]
    Other(String),
}

impl RemoteError {
    /// The unexpected HTTP status, if the remote answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Playground(e) => e.status(),
            Self::Other(_) => None,
        }
    }
}

/// Coarse classification of a [`StoreError`], used by callers to pick a
/// response without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The identifier failed validation. A client error.
    InvalidIdentifier,
    /// No tier holds the snippet.
    NotFound,
    /// The snippet body exceeds the size ceiling.
    TooLarge,
    /// The local store failed.
    StorageFailure,
    /// The remote fallback failed or exceeded its deadline.
    RemoteFailure,
}

/// Errors from [`SnippetStore`](crate::SnippetStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The identifier is malformed. Storage was not touched.
    #[error("invalid snippet id: {0}")]
    InvalidId(#[from] IdError),

    /// Neither the local store nor the remote source holds the snippet.
    #[error("snippet {0} not found")]
    NotFound(SnippetId),

    /// The snippet body is larger than the configured ceiling.
    #[error("snippet is {size} bytes, exceeding the {limit}-byte limit")]
    TooLarge { size: usize, limit: usize },

    /// The local store failed for a reason other than absence.
    #[error("local store: {0}")]
    Storage(#[from] StorageError),

    /// The remote fallback failed for a reason other than absence.
    #[error("remote fallback for {id}: {source}")]
    Remote {
        id: SnippetId,
        #[source]
        source: RemoteError,
    },

    /// The remote fallback did not answer within the deadline.
    #[error("remote fallback for {id} exceeded deadline of {deadline:?}")]
    RemoteTimeout { id: SnippetId, deadline: Duration },
}

impl StoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidId(_) => ErrorKind::InvalidIdentifier,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::TooLarge { .. } => ErrorKind::TooLarge,
            Self::Storage(_) => ErrorKind::StorageFailure,
            Self::Remote { .. } | Self::RemoteTimeout { .. } => ErrorKind::RemoteFailure,
        }
    }

    /// Whether this error means "does not exist" rather than "could not
    /// be determined".
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
