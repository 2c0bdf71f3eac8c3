//! Error types for diagram rendering.

/// Failure reported by a rendering engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// HTTP transport failure or error status from a remote engine.
    #[error("HTTP error: {0}")]
    Http(String),
    /// I/O failure talking to the engine.
    #[error("I/O error: {0}")]
    Io(String),
    /// Local engine process exited unsuccessfully.
    #[error("process exited with {}: {stderr}", exit_status(.code.as_ref()))]
    Process {
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
    /// Engine answered with something that is not the requested format.
    #[error("invalid {0} output")]
    InvalidOutput(&'static str),
}

fn exit_status(code: Option<&i32>) -> String {
    code.map_or_else(|| "signal".to_owned(), |c| format!("code {c}"))
}

/// Error returned by [`DiagramService`](crate::DiagramService).
///
/// Splits caller mistakes from engine failures so the HTTP layer and the
/// CLI can react differently if they want to.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Source is empty or whitespace only.
    #[error("diagram source cannot be empty")]
    EmptySource,
    /// Source bytes are not valid UTF-8.
    #[error("diagram source is not valid UTF-8")]
    InvalidUtf8,
    /// The rendering engine failed.
    #[error("failed to render diagram: {0}")]
    Engine(#[from] EngineError),
}

impl RenderError {
    /// Whether the error was caused by the input rather than the engine.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptySource | Self::InvalidUtf8)
    }
}
