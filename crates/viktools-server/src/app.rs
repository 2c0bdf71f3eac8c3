//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let plantuml_routes = Router::new()
        .route("/plantuml", get(static_files::plantuml_page))
        .route(
            "/plantuml/generate/png",
            post(handlers::plantuml::generate_png),
        )
        .route(
            "/plantuml/generate/svg",
            post(handlers::plantuml::generate_svg),
        )
        .route("/plantuml/validate", post(handlers::plantuml::validate));

    Router::new()
        .route("/health", get(handlers::health::get_health))
        .merge(plantuml_routes)
        .merge(static_files::static_router())
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
