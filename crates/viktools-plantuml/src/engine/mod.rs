//! Rendering engines.
//!
//! An engine turns framed `PlantUML` source into image bytes. Layout and
//! parsing happen entirely inside the engine; this crate only talks to it.

mod command;
mod kroki;

pub use command::CommandEngine;
pub use kroki::{KrokiEngine, create_agent};

use crate::error::EngineError;
use crate::format::DiagramFormat;

/// A black box that renders diagram markup to an image.
///
/// Implementations block until the image is ready. Callers on an async
/// runtime should move the call to a blocking thread.
pub trait DiagramEngine: Send + Sync {
    /// Short engine name for logs and health output.
    fn name(&self) -> &'static str;

    /// Render already normalized `source` to `format`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the engine cannot produce the image.
    fn render(&self, source: &str, format: DiagramFormat) -> Result<Vec<u8>, EngineError>;
}
