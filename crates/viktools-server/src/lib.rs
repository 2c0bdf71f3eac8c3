//! HTTP server for VikTools.
//!
//! This crate provides an axum server exposing:
//! - `PlantUML` rendering endpoints (PNG and SVG) and a syntax check
//! - HTML pages and static assets embedded via `viktools-assets`
//! - A health endpoint
//!
//! # Quick Start
//!
//! ```ignore
//! use viktools_config::Config;
//! use viktools_server::{run_server, server_config_from_config, service_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     let service = service_from_config(&config.plantuml).unwrap();
//!     let server_config = server_config_from_config(&config, "1.0.0".to_owned());
//!     run_server(server_config, service).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (viktools-server)
//!                        │
//!                        ├─► /plantuml/* handlers ──spawn_blocking──► DiagramService
//!                        │                                               │
//!                        │                                               └─► DiagramEngine (Kroki | command)
//!                        │
//!                        └─► pages and /static (viktools-assets)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use viktools_config::{Config, EngineKind, PlantUmlConfig};
use viktools_plantuml::{
    CommandEngine, DiagramEngine, DiagramService, EngineError, KrokiEngine, RenderValidator,
};

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Application version (reported by `/health`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            version: String::new(),
        }
    }
}

/// Error starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Host and port don't form a socket address.
    #[error("Invalid listen address '{addr}': {source}")]
    Address {
        /// The rejected `host:port` string.
        addr: String,
        /// Parse error.
        source: std::net::AddrParseError,
    },
    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the rendering engine selected in `config`.
///
/// # Errors
///
/// Returns an error if the command engine is selected with a blank command.
pub fn engine_from_config(config: &PlantUmlConfig) -> Result<Arc<dyn DiagramEngine>, EngineError> {
    let engine: Arc<dyn DiagramEngine> = match config.engine {
        EngineKind::Kroki => Arc::new(KrokiEngine::new(&config.kroki_url, config.timeout())),
        EngineKind::Command => Arc::new(CommandEngine::new(&config.command, &config.args)?),
    };
    tracing::debug!(engine = engine.name(), "Rendering engine configured");
    Ok(engine)
}

/// Build a [`DiagramService`] for the engine selected in `config`.
///
/// # Errors
///
/// See [`engine_from_config`].
pub fn service_from_config(config: &PlantUmlConfig) -> Result<DiagramService, EngineError> {
    engine_from_config(config).map(DiagramService::new)
}

/// Create server configuration from the application config.
#[must_use]
pub fn server_config_from_config(config: &Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        version,
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig, service: DiagramService) -> Result<(), ServerError> {
    let state = Arc::new(AppState {
        validator: Arc::new(RenderValidator::new(service.clone())),
        service,
        version: config.version.clone(),
    });

    let app = app::create_router(state);
    tracing::debug!(count = embedded_asset_count(), "Embedded assets available");

    let addr_str = format!("{}:{}", config.host, config.port);
    let addr = SocketAddr::from_str(&addr_str).map_err(|source| ServerError::Address {
        addr: addr_str,
        source,
    })?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Number of pages and static files compiled into the binary.
fn embedded_asset_count() -> usize {
    viktools_assets::iter().count()
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
