//! # snipstore-playground -- Typed Rust client for the Go Playground
//!
//! Fetches shared snippets from the Go Playground by identifier. The
//! snippet store consults this client only after a local miss, which
//! makes the playground the fallback source of truth for every id the
//! store has never seen.
//!
//! ## Protocol
//!
//! `GET {base_url}/{id}.go`, with a descriptive `User-Agent`:
//!
//! | Status | Result |
//! |--------|--------|
//! | 200    | `Ok(Some(body))` |
//! | 404    | `Ok(None)` |
//! | other  | `Err(PlaygroundError::UnexpectedStatus)` |
//!
//! Bodies are read chunk by chunk and abandoned with
//! [`PlaygroundError::TooLarge`] once they pass `max_body_bytes`.
//!
//! Requests are never retried. Retry policy, if any, belongs to the caller.

pub mod config;
pub mod error;

pub use config::PlaygroundConfig;
pub use error::PlaygroundError;

use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use snipstore_core::SnippetId;

/// Client for the Go Playground snippet endpoint.
#[derive(Debug, Clone)]
pub struct PlaygroundClient {
    http: reqwest::Client,
    base_url: url::Url,
    max_body_bytes: usize,
}

impl PlaygroundClient {
    /// Create a new playground client from configuration.
    pub fn new(config: PlaygroundConfig) -> Result<Self, PlaygroundError> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| config::ConfigError::InvalidUserAgent(config.user_agent.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| PlaygroundError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Base URL snippets are fetched from.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Full URL of the snippet with the given id.
    pub fn snippet_url(&self, id: &SnippetId) -> String {
        format!("{}/{id}.go", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Fetch a snippet by id.
    ///
    /// Calls `GET {base_url}/{id}.go`. Returns `Ok(None)` when the
    /// playground does not know the id.
    pub async fn fetch(&self, id: &SnippetId) -> Result<Option<Vec<u8>>, PlaygroundError> {
        let endpoint = format!("GET /{id}.go");
        let url = self.snippet_url(id);

        let mut resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PlaygroundError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                tracing::debug!(%id, "snippet not found on Go Playground");
                return Ok(None);
            }
            other => {
                return Err(PlaygroundError::UnexpectedStatus {
                    endpoint,
                    status: other.as_u16(),
                });
            }
        }

        let limit = self.max_body_bytes;
        if resp.content_length().is_some_and(|len| len > limit as u64) {
            tracing::warn!(%id, limit, "Go Playground response declares an oversized body");
            return Err(PlaygroundError::TooLarge { endpoint, limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| PlaygroundError::Body {
            endpoint: endpoint.clone(),
            source: e,
        })? {
            if body.len() + chunk.len() > limit {
                tracing::warn!(%id, limit, "Go Playground response body exceeds limit");
                return Err(PlaygroundError::TooLarge { endpoint, limit });
            }
            body.extend_from_slice(&chunk);
        }
        tracing::debug!(%id, bytes = body.len(), "fetched snippet from Go Playground");
        Ok(Some(body))
    }
}
