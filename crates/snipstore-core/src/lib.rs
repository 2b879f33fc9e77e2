#![deny(missing_docs)]

//! # snipstore-core: Foundational Types for the Snippet Store
//!
//! This crate defines the identifier scheme every other crate in the
//! workspace relies on. It has no internal crate dependencies, only
//! `serde`, `thiserror`, `sha1`, and `base64` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`SnippetId`] is the only storage key.** A `SnippetId` can only be
//!    obtained by deriving it from content or by validating a string, so a
//!    value of this type never contains path separators or dots.
//!
//! 2. **Derivation is frozen.** [`SnippetId::for_content`] reproduces the
//!    Go Playground sharing scheme bit for bit. Changing the salt or the
//!    digest breaks every identifier already handed out.
//!
//! 3. **Structured errors.** [`IdError`] carries the offending length or
//!    character so that callers can report exactly what was wrong.

pub mod error;
pub mod id;

pub use error::IdError;
pub use id::{SnippetId, DERIVED_ID_LEN, LEGACY_ID_LEN, SNIPPET_ID_SALT};

/// Largest snippet body, in bytes, the store accepts (1 MiB).
pub const MAX_SNIPPET_BYTES: usize = 1024 * 1024;
