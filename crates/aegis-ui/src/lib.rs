//! # aegis-ui
//!
//! Minimal server for the AEGIS OpenTRUST front-end.
//!
//! - `GET /<path>` serves `<root>/<path>`, `GET /` serves `<root>/index.html`
//! - `POST /api/evaluate` answers 501: the front-end runs its offline mock
//!   unless pointed at the real evaluation API
//! - Everything else is a plain-text 404

pub mod mime;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Document served for `/`.
pub const INDEX_DOCUMENT: &str = "index.html";

const NOT_FOUND_BODY: &str = "404 Not Found";

/// Shared state: the directory files are served from.
pub struct UiState {
    pub root: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct NotImplementedBody {
    pub error: &'static str,
    pub message: &'static str,
}

/// Build the static-site router serving files under `root`.
pub fn router(root: impl Into<PathBuf>) -> Router {
    let state = Arc::new(UiState { root: root.into() });

    Router::new()
        .route(
            "/api/evaluate",
            post(api_not_implemented).fallback(serve_file),
        )
        .fallback(serve_file)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map a request path to a file under `root`.
///
/// The query string is not part of `url_path`. Returns `None` when the path
/// would leave `root`.
pub fn resolve_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let relative = if url_path == "/" {
        INDEX_DOCUMENT
    } else {
        url_path.strip_prefix('/').unwrap_or(url_path)
    };

    let relative = Path::new(relative);
    let stays_inside = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    stays_inside.then(|| root.join(relative))
}

async fn api_not_implemented() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(NotImplementedBody {
            error: "NOT_IMPLEMENTED",
            message: "API mode not implemented in this minimal server. Use offline mock in index.html or extend this endpoint.",
        }),
    )
}

async fn serve_file(State(state): State<Arc<UiState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return not_found();
    }

    let Some(path) = resolve_path(&state.root, uri.path()) else {
        debug!(path = uri.path(), "Rejected path outside root");
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, mime::content_type_for(&path))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "File not served");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

/// Resolves once `signal` fires. If the signal handler fails to install,
/// the error is logged and this never resolves, so the server keeps running
/// until killed.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
