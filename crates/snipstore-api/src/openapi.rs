//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the snippet service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Snippet Store",
        version = "0.1.0",
        description = "Content-addressed storage for GopherJS playground snippets with Go Playground fallback.",
        license(name = "BSD-3-Clause")
    ),
    paths(
        crate::routes::snippets::share_snippet,
        crate::routes::snippets::get_snippet,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "snippets", description = "Share and fetch playground snippets"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
