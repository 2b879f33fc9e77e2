//! # Snippet Identifiers
//!
//! A [`SnippetId`] is the public reference to a snippet and the key it is
//! stored under. Two ways to obtain one:
//!
//! - [`SnippetId::for_content`] derives the identifier from snippet bytes.
//! - [`SnippetId::parse`] validates an identifier received from a client.
//!
//! ## Derivation
//!
//! `base64url(sha1(SALT || body))[..10]`, the scheme the Go Playground uses
//! for shared snippets. Identifiers derived here therefore resolve on the
//! playground and vice versa.
//!
//! ## Validation
//!
//! Accepted identifiers are 10 bytes (derived today) or 11 bytes (issued
//! by older revisions of the playground) long and use only the URL-safe
//! base64 alphabet `[A-Za-z0-9_-]`. Derivation never produces 11-byte ids;
//! the longer form is accepted for lookups only.
//!
//! Validation is the only guard between request input and the storage
//! namespace. It rejects `.`, `/`, and every other character that could
//! address a path outside the store.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::IdError;

/// Salt prepended to the snippet body before hashing.
///
/// This is the value used by the Go Playground's share handler. It must
/// never change.
pub const SNIPPET_ID_SALT: &str = "[replace this with something unique]";

/// Length of identifiers produced by [`SnippetId::for_content`].
pub const DERIVED_ID_LEN: usize = 10;

/// Length of long-form identifiers still accepted for lookups.
pub const LEGACY_ID_LEN: usize = 11;

/// A validated snippet identifier.
///
/// The inner string is guaranteed to be 10 or 11 characters from
/// `[A-Za-z0-9_-]`, which makes it safe to use directly as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnippetId(String);

impl SnippetId {
    /// Derive the identifier for a snippet body.
    pub fn for_content(body: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(SNIPPET_ID_SALT.as_bytes());
        hasher.update(body);
        let sum = hasher.finalize();

        let mut encoded = URL_SAFE.encode(sum);
        encoded.truncate(DERIVED_ID_LEN);
        Self(encoded)
    }

    /// Validate an identifier received from outside the process.
    pub fn parse(id: &str) -> Result<Self, IdError> {
        validate(id)?;
        Ok(Self(id.to_owned()))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier uses the older 11-character form.
    pub fn is_legacy(&self) -> bool {
        self.0.len() == LEGACY_ID_LEN
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Check length first, then every character in order.
fn validate(id: &str) -> Result<(), IdError> {
    if id.len() != DERIVED_ID_LEN && id.len() != LEGACY_ID_LEN {
        return Err(IdError::Length { actual: id.len() });
    }
    match id.chars().find(|c| !is_id_char(*c)) {
        Some(c) => Err(IdError::UnexpectedChar(c)),
        None => Ok(()),
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SnippetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SnippetId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SnippetId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate(&s)?;
        Ok(Self(s))
    }
}

impl From<SnippetId> for String {
    fn from(id: SnippetId) -> Self {
        id.0
    }
}

impl PartialEq<str> for SnippetId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SnippetId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
