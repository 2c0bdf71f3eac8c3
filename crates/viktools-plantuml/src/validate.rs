//! Diagram syntax validation.
//!
//! There is no `PlantUML` parser here. [`RenderValidator`] decides validity
//! by rendering to PNG and discarding the image, so "valid" really means
//! "the engine could render it". Callers depend on [`SyntaxValidator`] only,
//! which leaves room for a parser-based implementation.

use crate::format::DiagramFormat;
use crate::service::DiagramService;

/// Outcome of a validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the source is considered valid.
    pub valid: bool,
    /// Why the source was rejected.
    pub reason: Option<String>,
}

impl Validation {
    /// A passing result.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// A failing result with a reason.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decides whether diagram source is well-formed.
pub trait SyntaxValidator: Send + Sync {
    /// Check `source`. Never fails; problems are reported as invalid.
    fn validate(&self, source: &str) -> Validation;
}

/// Validator that attempts a PNG render.
#[derive(Clone)]
pub struct RenderValidator {
    service: DiagramService,
}

impl RenderValidator {
    /// Create a validator rendering through `service`.
    #[must_use]
    pub fn new(service: DiagramService) -> Self {
        Self { service }
    }
}

impl SyntaxValidator for RenderValidator {
    fn validate(&self, source: &str) -> Validation {
        match self.service.render(source, DiagramFormat::Png) {
            Ok(_) => {
                tracing::info!("Diagram syntax check passed");
                Validation::valid()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Diagram syntax check failed");
                Validation::invalid(e.to_string())
            }
        }
    }
}
