//! Static file serving for the built client.
//!
//! Unknown paths get `index.html` with status 404, so the browser still loads
//! the client and its router renders the not-found page.

use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

pub fn router(static_dir: &Path) -> Router {
    // `not_found_service` answers with 404 whatever the wrapped service returns.
    let serve_dir = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .fallback_service(serve_dir)
}
