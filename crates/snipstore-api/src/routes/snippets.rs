//! # Snippet Routes
//!
//! The two endpoints the GopherJS playground talks to. Bodies are opaque
//! bytes in both directions; ids are plain text.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Build the snippet router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/share", post(share_snippet))
        // Every suffix after `/p/` is the id, so malformed ids reach the
        // validator instead of falling through to the router's 404.
        .route("/p/", get(get_snippet_without_id))
        .route("/p/*id", get(get_snippet))
}

/// POST /share: store a snippet and return its id.
#[utoipa::path(
    post,
    path = "/share",
    request_body(content = String, content_type = "text/plain", description = "Snippet source"),
    responses(
        (status = 200, description = "Id of the stored snippet", body = String, content_type = "text/plain"),
        (status = 413, description = "Snippet exceeds the size limit", body = crate::error::ErrorBody),
        (status = 500, description = "Snippet could not be persisted", body = crate::error::ErrorBody),
    ),
    tag = "snippets"
)]
pub(crate) async fn share_snippet(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map_err(AppError::from_body_rejection)?;
    let id = state.store.store_snippet(&body).await?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], id.into_inner()))
}

/// GET /p/{id}: serve a snippet by id.
#[utoipa::path(
    get,
    path = "/p/{id}",
    params(("id" = String, Path, description = "Snippet id, 10 or 11 characters of [A-Za-z0-9_-]")),
    responses(
        (status = 200, description = "Snippet source; `application/octet-stream` when not UTF-8", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Snippet not found", body = crate::error::ErrorBody),
        (status = 500, description = "Storage or playground failure", body = crate::error::ErrorBody),
    ),
    tag = "snippets"
)]
pub(crate) async fn get_snippet(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    load(&state, &id).await
}

/// GET /p/ with nothing after the prefix.
async fn get_snippet_without_id(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    load(&state, "").await
}

async fn load(state: &AppState, id: &str) -> Result<impl IntoResponse, AppError> {
    let body = state.store.load_snippet(id).await?;
    let content_type = if std::str::from_utf8(&body).is_ok() {
        TEXT_PLAIN_UTF8
    } else {
        OCTET_STREAM
    };
    Ok(([(header::CONTENT_TYPE, HeaderValue::from_static(content_type))], body))
}
