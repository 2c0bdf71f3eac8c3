//! Rendering through a Kroki server.
//!
//! Sends the source as a plain-text `POST` to `{server}/plantuml/{format}`.
//! Kroki answers 4xx with a text body describing the syntax error, which is
//! passed through in the [`EngineError`].

use std::time::Duration;

use ureq::Agent;

use super::DiagramEngine;
use crate::error::EngineError;
use crate::format::DiagramFormat;

/// Kroki diagram type for `PlantUML` sources.
const KROKI_ENDPOINT: &str = "plantuml";

/// Create HTTP agent with the specified timeout.
///
/// HTTP error statuses are returned as responses so their bodies can be
/// read for error details.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Engine backed by a Kroki server.
#[derive(Clone)]
pub struct KrokiEngine {
    agent: Agent,
    server_url: String,
}

impl KrokiEngine {
    /// Create an engine for `server_url` (e.g., `https://kroki.io`).
    #[must_use]
    pub fn new(server_url: &str, timeout: Duration) -> Self {
        Self::with_agent(server_url, create_agent(timeout))
    }

    /// Create an engine that reuses an existing agent.
    #[must_use]
    pub fn with_agent(server_url: &str, agent: Agent) -> Self {
        Self {
            agent,
            server_url: server_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL the diagram is posted to.
    fn endpoint_url(&self, format: DiagramFormat) -> String {
        format!("{}/{KROKI_ENDPOINT}/{}", self.server_url, format.as_str())
    }
}

impl DiagramEngine for KrokiEngine {
    fn name(&self) -> &'static str {
        "kroki"
    }

    fn render(&self, source: &str, format: DiagramFormat) -> Result<Vec<u8>, EngineError> {
        let url = self.endpoint_url(format);
        tracing::debug!(url = %url, "Sending diagram to Kroki");

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/plain")
            .send(source.as_bytes())
            .map_err(|e| EngineError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(EngineError::Http(format!(
                "HTTP {status}: {}",
                error_body.trim()
            )));
        }

        body.read_to_vec().map_err(|e| EngineError::Io(e.to_string()))
    }
}
