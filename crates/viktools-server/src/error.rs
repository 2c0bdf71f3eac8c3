//! Error types for the HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::task::JoinError;
use viktools_plantuml::RenderError;

/// Error returned by the render endpoints.
///
/// Every variant maps to `400 Bad Request` with an empty body; the detail
/// only goes to the log.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    /// Invalid input or engine failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The blocking render task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Render(e) if e.is_invalid_input() => {
                tracing::debug!(error = %self, "Rejected diagram request");
            }
            _ => tracing::warn!(error = %self, "Diagram request failed"),
        }

        StatusCode::BAD_REQUEST.into_response()
    }
}
