//! HTML pages and static assets.
//!
//! Pages and `/static/*` files come from `viktools-assets`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::state::AppState;

/// Create router for the home page and static assets.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home_page))
        .route("/static/{*path}", get(static_asset))
}

/// Handle GET /.
async fn home_page() -> Response {
    serve_asset("index.html")
}

/// Handle GET /plantuml.
pub(crate) async fn plantuml_page() -> Response {
    serve_asset("plantuml.html")
}

/// Handle GET /static/{*path}.
async fn static_asset(Path(path): Path<String>) -> Response {
    serve_asset(&path)
}

/// Serve an embedded asset, or 404 if it doesn't exist.
fn serve_asset(path: &str) -> Response {
    match viktools_assets::get(path) {
        Some(content) => (
            [(header::CONTENT_TYPE, viktools_assets::mime_for(path))],
            Body::from(content.into_owned()),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
