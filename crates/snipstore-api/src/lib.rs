//! # snipstore-api: HTTP Service for Playground Snippets
//!
//! Serves the GopherJS playground's share and load endpoints on top of
//! [`snipstore_storage::SnippetStore`].
//!
//! ## API Surface
//!
//! | Route                 | Module                  | Purpose                     |
//! |-----------------------|-------------------------|-----------------------------|
//! | `POST /share`         | [`routes::snippets`]    | Store a snippet, return id  |
//! | `GET /p/{id}`         | [`routes::snippets`]    | Load a snippet by id        |
//! | `GET /openapi.json`   | [`openapi`]             | OpenAPI document            |
//! | `GET /health/*`       | this module             | Liveness and readiness      |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → DefaultBodyLimit → Handler
//! ```

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(state.config.allow_origin.clone()))
        .allow_methods([Method::GET, Method::POST]);
    let body_limit = DefaultBodyLimit::max(state.config.store.max_snippet_bytes);

    let api = Router::new()
        .merge(routes::snippets::router())
        .merge(openapi::router())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(body_limit),
    )
}

/// Liveness probe. Always 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The store is opened before the listener binds, so
/// reaching this handler means the service can take traffic.
async fn readiness() -> &'static str {
    "ready"
}
