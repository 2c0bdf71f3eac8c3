//! Normalize-then-render service.

use std::sync::Arc;

use crate::consts::PNG_SIGNATURE;
use crate::engine::DiagramEngine;
use crate::error::{EngineError, RenderError};
use crate::format::DiagramFormat;
use crate::source::normalize_source;

/// Rendered image tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Output format.
    pub format: DiagramFormat,
    /// Raw image bytes (UTF-8 markup for SVG).
    pub data: Vec<u8>,
}

impl Rendered {
    /// MIME type of [`Self::data`].
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Renders user-supplied `PlantUML` text through a [`DiagramEngine`].
///
/// Cheap to clone; the engine is shared.
#[derive(Clone)]
pub struct DiagramService {
    engine: Arc<dyn DiagramEngine>,
}

impl DiagramService {
    /// Create a service around `engine`.
    #[must_use]
    pub fn new(engine: Arc<dyn DiagramEngine>) -> Self {
        Self { engine }
    }

    /// Name of the underlying engine.
    #[must_use]
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Normalize `source` and render it to `format`.
    ///
    /// Blank input is rejected before the engine is called. Output that
    /// doesn't look like the requested format is reported as an engine
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptySource`] for blank input and
    /// [`RenderError::Engine`] for any engine failure.
    pub fn render(&self, source: &str, format: DiagramFormat) -> Result<Rendered, RenderError> {
        let normalized = normalize_source(source)?;
        tracing::debug!(engine = self.engine.name(), format = %format, "Rendering diagram");

        let data = self
            .engine
            .render(&normalized, format)
            .inspect_err(|e| tracing::warn!(error = %e, format = %format, "Diagram rendering failed"))?;

        check_output(&data, format)?;
        tracing::info!(format = %format, bytes = data.len(), "Diagram rendered");

        Ok(Rendered { format, data })
    }

    /// Render `source` to PNG bytes.
    ///
    /// # Errors
    ///
    /// See [`Self::render`].
    pub fn render_png(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        self.render(source, DiagramFormat::Png).map(|r| r.data)
    }

    /// Render `source` to SVG markup.
    ///
    /// # Errors
    ///
    /// See [`Self::render`].
    pub fn render_svg(&self, source: &str) -> Result<String, RenderError> {
        let rendered = self.render(source, DiagramFormat::Svg)?;
        // check_output already verified UTF-8
        String::from_utf8(rendered.data)
            .map_err(|_| RenderError::Engine(EngineError::InvalidOutput("svg")))
    }
}

/// Reject engine output that is not the requested format.
fn check_output(data: &[u8], format: DiagramFormat) -> Result<(), EngineError> {
    let valid = match format {
        DiagramFormat::Png => data.starts_with(PNG_SIGNATURE),
        DiagramFormat::Svg => std::str::from_utf8(data).is_ok_and(|svg| svg.contains("<svg")),
    };

    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidOutput(format.as_str()))
    }
}
