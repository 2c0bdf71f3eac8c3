//! Rendering through a local `PlantUML` executable.
//!
//! Runs `plantuml -pipe -t{format} -charset UTF-8`, writing the source to
//! stdin and reading the image from stdout. One process per render.

use std::io::Write;
use std::process::{Command, Stdio};

use super::DiagramEngine;
use crate::error::EngineError;
use crate::format::DiagramFormat;

/// Engine backed by a local `PlantUML` command.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    /// Create an engine from a command line such as `plantuml` or
    /// `java -jar /opt/plantuml.jar`.
    ///
    /// The command is split on whitespace; `extra_args` are appended before
    /// the arguments this engine adds itself.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if `command` is blank.
    pub fn new(command: &str, extra_args: &[String]) -> Result<Self, EngineError> {
        let mut parts = command.split_whitespace().map(str::to_owned);
        let program = parts
            .next()
            .ok_or_else(|| EngineError::Io("PlantUML command is empty".to_owned()))?;
        let mut args: Vec<String> = parts.collect();
        args.extend_from_slice(extra_args);
        Ok(Self { program, args })
    }

    /// Full argument list for rendering to `format`.
    fn command_args(&self, format: DiagramFormat) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(format!("-t{}", format.as_str()));
        args.extend(["-pipe", "-charset", "UTF-8"].map(str::to_owned));
        args
    }
}

impl DiagramEngine for CommandEngine {
    fn name(&self) -> &'static str {
        "command"
    }

    fn render(&self, source: &str, format: DiagramFormat) -> Result<Vec<u8>, EngineError> {
        let args = self.command_args(format);
        tracing::debug!(program = %self.program, args = ?args, "Running PlantUML");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::Io(format!("failed to start '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Io("PlantUML stdin not captured".to_owned()))?;

        // stdout must be drained while stdin is still being written
        let (write_result, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (write_result, output)
        });

        let output = output.map_err(|e| EngineError::Io(e.to_string()))?;

        if !output.status.success() {
            return Err(EngineError::Process {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        write_result.map_err(|e| EngineError::Io(format!("failed to write source: {e}")))?;
        Ok(output.stdout)
    }
}
