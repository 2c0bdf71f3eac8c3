//! `viktools render` command implementation.

use std::path::PathBuf;

use clap::Args;
use viktools_plantuml::DiagramFormat;
use viktools_server::service_from_config;

use super::{EngineArgs, read_source};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Diagram source file, or `-` for stdin.
    input: PathBuf,

    /// Output format: png or svg.
    #[arg(short, long, default_value = "png")]
    format: DiagramFormat,

    /// Output file (default: input with the format's extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the source can't be read, rendering fails,
    /// or the image can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.engine.load_config(None, None)?;
        let service = service_from_config(&config.plantuml)?;

        let source = read_source(&self.input)?;
        tracing::debug!(input = %self.input.display(), format = %self.format, "Rendering diagram");
        let rendered = service.render(&source, self.format)?;

        let target = self.output_path()?;
        std::fs::write(&target, &rendered.data)?;
        output.success(&format!(
            "Wrote {} ({} bytes)",
            target.display(),
            rendered.data.len()
        ));

        Ok(())
    }

    /// Resolve where the image goes.
    fn output_path(&self) -> Result<PathBuf, CliError> {
        if let Some(path) = &self.output {
            return Ok(path.clone());
        }
        if self.input.as_os_str() == "-" {
            return Err(CliError::Validation(
                "--output is required when reading from stdin".to_owned(),
            ));
        }
        Ok(self.input.with_extension(self.format.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(input: &str, format: DiagramFormat, output: Option<&str>) -> RenderArgs {
        RenderArgs {
            input: PathBuf::from(input),
            format,
            output: output.map(PathBuf::from),
            engine: EngineArgs::default(),
        }
    }

    #[test]
    fn test_output_path_defaults_to_input_extension() {
        let path = args("docs/seq.puml", DiagramFormat::Svg, None)
            .output_path()
            .unwrap();
        assert_eq!(path, PathBuf::from("docs/seq.svg"));
    }

    #[test]
    fn test_output_path_explicit() {
        let path = args("seq.puml", DiagramFormat::Png, Some("out/diagram.png"))
            .output_path()
            .unwrap();
        assert_eq!(path, PathBuf::from("out/diagram.png"));
    }

    #[test]
    fn test_output_path_stdin_requires_output() {
        let err = args("-", DiagramFormat::Png, None).output_path().unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
