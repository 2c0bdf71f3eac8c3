//! Application state.
//!
//! Shared, immutable state for all request handlers.

use std::sync::Arc;

use viktools_plantuml::{DiagramService, SyntaxValidator};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Diagram rendering service.
    pub(crate) service: DiagramService,
    /// Syntax check used by the validate endpoint.
    pub(crate) validator: Arc<dyn SyntaxValidator>,
    /// Application version.
    pub(crate) version: String,
}

/// State backed by an in-process engine that accepts any source containing
/// an arrow (`->`) and rejects everything else.
#[cfg(test)]
pub(crate) fn test_state() -> Arc<AppState> {
    use viktools_plantuml::{DiagramEngine, DiagramFormat, EngineError, RenderValidator};

    struct ArrowEngine;

    impl DiagramEngine for ArrowEngine {
        fn name(&self) -> &'static str {
            "test"
        }

        fn render(&self, source: &str, format: DiagramFormat) -> Result<Vec<u8>, EngineError> {
            if !source.contains("->") {
                return Err(EngineError::Http("HTTP 400: Syntax Error?".to_owned()));
            }
            Ok(match format {
                DiagramFormat::Png => b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec(),
                DiagramFormat::Svg => b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_vec(),
            })
        }
    }

    let service = DiagramService::new(Arc::new(ArrowEngine));
    Arc::new(AppState {
        validator: Arc::new(RenderValidator::new(service.clone())),
        service,
        version: "0.0.0-test".to_owned(),
    })
}
