//! `PlantUML` API endpoints.
//!
//! All three endpoints take the raw diagram text as the request body.
//! Rendering blocks, so it runs on tokio's blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use viktools_plantuml::{DiagramFormat, RenderError, Rendered, Validation};

use crate::error::ApiError;
use crate::state::AppState;

/// Response for POST /plantuml/validate.
#[derive(Debug, Serialize)]
pub(crate) struct ValidateResponse {
    /// Whether the diagram rendered.
    valid: bool,
    /// Set only when the check itself could not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle POST /plantuml/generate/png.
pub(crate) async fn generate_png(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let rendered = render(&state, body, DiagramFormat::Png).await?;
    Ok(image_response(rendered))
}

/// Handle POST /plantuml/generate/svg.
pub(crate) async fn generate_svg(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let rendered = render(&state, body, DiagramFormat::Svg).await?;
    Ok(image_response(rendered))
}

/// Handle POST /plantuml/validate.
pub(crate) async fn validate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<ValidateResponse>) {
    let validator = Arc::clone(&state.validator);
    let result = tokio::task::spawn_blocking(move || match std::str::from_utf8(&body) {
        Ok(source) => validator.validate(source),
        Err(_) => Validation::invalid(RenderError::InvalidUtf8.to_string()),
    })
    .await;

    match result {
        Ok(validation) => (
            StatusCode::OK,
            Json(ValidateResponse {
                valid: validation.valid,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Validation task failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ValidateResponse {
                    valid: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Decode the body and render it on the blocking pool.
async fn render(state: &AppState, body: Bytes, format: DiagramFormat) -> Result<Rendered, ApiError> {
    let source = String::from_utf8(body.to_vec()).map_err(|_| RenderError::InvalidUtf8)?;
    let service = state.service.clone();
    let rendered = tokio::task::spawn_blocking(move || service.render(&source, format)).await??;
    Ok(rendered)
}

/// Build a 200 response carrying the image with its type and length.
fn image_response(rendered: Rendered) -> Response {
    (
        [
            (header::CONTENT_TYPE, rendered.content_type().to_owned()),
            (header::CONTENT_LENGTH, rendered.data.len().to_string()),
        ],
        rendered.data,
    )
        .into_response()
}
