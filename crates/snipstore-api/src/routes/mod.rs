//! # API Route Modules
//!
//! - `snippets`: share a snippet (`POST /share`) and fetch one by id
//!   (`GET /p/{id}`), falling back to the Go Playground on a local miss.

pub mod snippets;
