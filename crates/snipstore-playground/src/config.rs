//! Playground client configuration.
//!
//! Defaults point to the production Go Playground. Override via
//! environment variables or explicit construction for staging/testing.

use std::time::Duration;

use snipstore_core::MAX_SNIPPET_BYTES;
use url::Url;

/// Default base URL for shared snippets.
pub const DEFAULT_BASE_URL: &str = "https://play.golang.org/p";

/// User agent sent with every fetch so the playground can identify us.
pub const DEFAULT_USER_AGENT: &str = "gopherjs.org/play/ playground snippet fetcher";

/// Default request timeout in seconds (3 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Configuration for fetching snippets from the playground.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    /// Base URL snippets live under. A snippet `id` is fetched from
    /// `{base_url}/{id}.go`.
    pub base_url: Url,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Largest response body accepted before the fetch is abandoned.
    pub max_body_bytes: usize,
}

impl PlaygroundConfig {
    /// Configuration for the production Go Playground.
    pub fn production() -> Result<Self, ConfigError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Configuration with default user agent and timeout for the given base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: MAX_SNIPPET_BYTES,
        })
    }

    /// Push the request timeout just past `deadline`.
    ///
    /// The caller's deadline then always fires first, so a slow playground
    /// is reported by the caller rather than as a transport error.
    pub fn outlasting(mut self, deadline: Duration) -> Self {
        self.timeout_secs = deadline.as_secs().saturating_add(1);
        self
    }

    /// Load configuration from environment variables, starting from
    /// [`production`](Self::production).
    ///
    /// Variables:
    /// - `SNIPSTORE_PLAYGROUND_URL` (default: `https://play.golang.org/p`)
    /// - `SNIPSTORE_PLAYGROUND_USER_AGENT` (default: [`DEFAULT_USER_AGENT`])
    ///
    /// The request timeout is left at its default; services bound it to
    /// their own deadline with [`outlasting`](Self::outlasting).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::production()?;
        if std::env::var_os("SNIPSTORE_PLAYGROUND_URL").is_some() {
            cfg.base_url = env_url("SNIPSTORE_PLAYGROUND_URL", DEFAULT_BASE_URL)?;
        }
        if let Ok(user_agent) = std::env::var("SNIPSTORE_PLAYGROUND_USER_AGENT") {
            cfg.user_agent = user_agent;
        }
        Ok(cfg)
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout_secs: 5,
            ..Self::with_base_url(base_url)?
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid user agent header value: {0:?}")]
    InvalidUserAgent(String),
}
