//! `viktools check` command implementation.

use std::path::PathBuf;

use clap::Args;
use viktools_plantuml::{RenderValidator, SyntaxValidator};
use viktools_server::service_from_config;

use super::{EngineArgs, read_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Diagram source file, or `-` for stdin.
    input: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Validation`] when the diagram doesn't render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.engine.load_config(None, None)?;
        let validator = RenderValidator::new(service_from_config(&config.plantuml)?);
        let source = read_source(&self.input)?;

        let validation = validator.validate(&source);
        if validation.valid {
            output.success("Diagram is valid");
            Ok(())
        } else {
            Err(CliError::Validation(
                validation
                    .reason
                    .unwrap_or_else(|| "diagram is invalid".to_owned()),
            ))
        }
    }
}
