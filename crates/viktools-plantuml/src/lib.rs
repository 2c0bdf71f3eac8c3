//! `PlantUML` rendering for VikTools.
//!
//! This crate turns user-supplied diagram text into images:
//! - [`normalize_source`] frames the text with `@startuml`/`@enduml` markers
//! - [`DiagramEngine`] is the black-box renderer, implemented by
//!   [`KrokiEngine`] (HTTP) and [`CommandEngine`] (local executable)
//! - [`DiagramService`] ties the two together and checks the output
//! - [`SyntaxValidator`] decides well-formedness, via [`RenderValidator`]
//!
//! Layout and parsing are the engine's job; nothing here understands the
//! markup beyond its start/end markers.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use viktools_plantuml::{DiagramService, KrokiEngine, DEFAULT_TIMEOUT};
//!
//! let engine = KrokiEngine::new("https://kroki.io", DEFAULT_TIMEOUT);
//! let service = DiagramService::new(Arc::new(engine));
//! let svg = service.render_svg("Alice -> Bob: hello")?;
//! ```

mod consts;
mod engine;
mod error;
mod format;
mod service;
mod source;
mod validate;

pub use consts::DEFAULT_TIMEOUT;
pub use engine::{CommandEngine, DiagramEngine, KrokiEngine, create_agent};
pub use error::{EngineError, RenderError};
pub use format::{DiagramFormat, UnknownFormat};
pub use service::{DiagramService, Rendered};
pub use source::normalize_source;
pub use validate::{RenderValidator, SyntaxValidator, Validation};
