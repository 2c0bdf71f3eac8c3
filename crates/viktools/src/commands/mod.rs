//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;
pub(crate) mod serve;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use viktools_config::{CliSettings, Config, EngineKind};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

/// Engine options shared by all commands.
#[derive(Args, Debug, Default)]
pub(crate) struct EngineArgs {
    /// Path to configuration file (default: auto-discover viktools.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Rendering engine: kroki or command (overrides config).
    #[arg(long)]
    pub(crate) engine: Option<EngineKind>,

    /// Kroki server URL (overrides config).
    #[arg(long, env = "VIKTOOLS_KROKI_URL")]
    pub(crate) kroki_url: Option<String>,

    /// Local PlantUML command, e.g. "java -jar plantuml.jar" (overrides config).
    #[arg(long)]
    pub(crate) plantuml_command: Option<String>,
}

impl EngineArgs {
    /// Load configuration with these options applied on top.
    pub(crate) fn load_config(
        &self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            engine: self.engine,
            kroki_url: self.kroki_url.clone(),
            plantuml_command: self.plantuml_command.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Read diagram source from a file, or from stdin when the path is `-`.
pub(crate) fn read_source(input: &Path) -> Result<String, CliError> {
    if input == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.puml");
        std::fs::write(&path, "Alice -> Bob").unwrap();
        assert_eq!(read_source(&path).unwrap(), "Alice -> Bob");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/seq.puml")).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viktools.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let args = EngineArgs {
            config: Some(path),
            engine: Some(EngineKind::Command),
            plantuml_command: Some("plantuml".to_owned()),
            ..Default::default()
        };
        let config = args.load_config(None, Some(9100)).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.plantuml.engine, EngineKind::Command);
    }
}
