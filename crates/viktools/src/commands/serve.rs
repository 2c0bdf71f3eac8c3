//! `viktools serve` command implementation.

use clap::Args;
use viktools_config::EngineKind;
use viktools_server::{run_server, server_config_from_config, service_from_config};

use super::EngineArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    #[command(flatten)]
    engine: EngineArgs,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.engine.load_config(self.host, self.port)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        match config.plantuml.engine {
            EngineKind::Kroki => {
                output.info(&format!("Kroki URL: {}", config.plantuml.kroki_url));
            }
            EngineKind::Command => {
                output.info(&format!("PlantUML command: {}", config.plantuml.command));
            }
        }

        let service = service_from_config(&config.plantuml)?;
        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config, service).await?;

        Ok(())
    }
}
