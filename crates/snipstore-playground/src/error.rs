//! Playground client error types.

/// Errors from playground fetches.
///
/// A missing snippet is not an error: [`fetch`](crate::PlaygroundClient::fetch)
/// reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The playground answered with something other than 200 or 404.
    #[error("Go Playground {endpoint} returned unexpected status code {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },
    /// The response body could not be read to completion.
    #[error("failed to read response body from {endpoint}: {source}")]
    Body {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The response body exceeded the configured limit.
    #[error("Go Playground {endpoint} response exceeds the {limit}-byte limit")]
    TooLarge { endpoint: String, limit: usize },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl PlaygroundError {
    /// The unexpected HTTP status, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
