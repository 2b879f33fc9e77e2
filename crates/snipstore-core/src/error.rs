//! # Identifier Errors
//!
//! Validation failures for snippet identifiers, built with `thiserror`.
//! Each variant carries the input detail an operator needs to see why a
//! request was rejected.

use thiserror::Error;

/// Reasons a string is not an acceptable snippet identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The identifier is neither the derived nor the legacy length.
    #[error("id length is {actual} instead of 10 or 11")]
    Length {
        /// Length of the rejected input, in bytes.
        actual: usize,
    },

    /// The identifier contains a character outside `[A-Za-z0-9_-]`.
    #[error("id contains unexpected character {}", quote_char(.0))]
    UnexpectedChar(char),
}

/// Render a character as a quoted literal: printable ASCII as-is,
/// everything else as a `\u{..}` escape.
fn quote_char(c: &char) -> String {
    let c = *c;
    if c.is_ascii_graphic() || c == ' ' {
        match c {
            '\'' => "'\\''".to_string(),
            '\\' => "'\\\\'".to_string(),
            _ => format!("'{c}'"),
        }
    } else {
        format!("'{}'", c.escape_unicode())
    }
}
