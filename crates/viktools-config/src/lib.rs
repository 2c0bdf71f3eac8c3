//! Configuration management for VikTools.
//!
//! Parses `viktools.toml` with serde and discovers the file in the current
//! directory or any of its parents. Values passed on the command line are
//! applied on top via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `server.host`
//! - `plantuml.kroki_url`
//! - `plantuml.command`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "viktools.toml";

/// Public Kroki instance used when no URL is configured.
pub const DEFAULT_KROKI_URL: &str = "https://kroki.io";

/// Upper bound for `plantuml.timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 600;

/// CLI settings that override configuration file values.
///
/// Only `Some` values are applied.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the rendering engine.
    pub engine: Option<EngineKind>,
    /// Override the Kroki URL.
    pub kroki_url: Option<String>,
    /// Override the local `PlantUML` command.
    pub plantuml_command: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Diagram rendering configuration.
    pub plantuml: PlantUmlConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Which rendering engine to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Remote Kroki service over HTTP.
    #[default]
    Kroki,
    /// Local `PlantUML` executable in pipe mode.
    Command,
}

impl std::str::FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kroki" => Ok(Self::Kroki),
            "command" => Ok(Self::Command),
            other => Err(ConfigError::Validation(format!(
                "unknown plantuml.engine '{other}' (expected 'kroki' or 'command')"
            ))),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kroki => f.write_str("kroki"),
            Self::Command => f.write_str("command"),
        }
    }
}

/// Diagram rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlantUmlConfig {
    /// Rendering engine.
    pub engine: EngineKind,
    /// Kroki server URL.
    pub kroki_url: String,
    /// `PlantUML` executable for the command engine.
    pub command: String,
    /// Extra arguments passed to the `PlantUML` executable.
    pub args: Vec<String>,
    /// Timeout for Kroki requests, in seconds.
    pub timeout_secs: u64,
}

impl Default for PlantUmlConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Kroki,
            kroki_url: DEFAULT_KROKI_URL.to_owned(),
            command: "plantuml".to_owned(),
            args: Vec::new(),
            timeout_secs: 30,
        }
    }
}

impl PlantUmlConfig {
    /// Kroki request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`plantuml.kroki_url`").
        field: String,
        /// Error message (e.g., "${`KROKI_URL`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `viktools.toml` in the current directory and its parents, falling
    /// back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and the result is validated
    /// again, so an override cannot smuggle in an invalid value.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing or
    /// env expansion fails, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(engine) = settings.engine {
            self.plantuml.engine = engine;
        }
        if let Some(kroki_url) = &settings.kroki_url {
            self.plantuml.kroki_url.clone_from(kroki_url);
        }
        if let Some(command) = &settings.plantuml_command {
            self.plantuml.command.clone_from(command);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Engine-specific settings are only checked for the selected engine.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_plantuml()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_plantuml(&self) -> Result<(), ConfigError> {
        let plantuml = &self.plantuml;

        match plantuml.engine {
            EngineKind::Kroki => {
                require_non_empty(&plantuml.kroki_url, "plantuml.kroki_url")?;
                require_http_url(&plantuml.kroki_url, "plantuml.kroki_url")?;
            }
            EngineKind::Command => {
                require_non_empty(&plantuml.command, "plantuml.command")?;
            }
        }

        if plantuml.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "plantuml.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if plantuml.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "plantuml.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.plantuml.kroki_url = expand::expand_env(&self.plantuml.kroki_url, "plantuml.kroki_url")?;
        self.plantuml.command = expand::expand_env(&self.plantuml.command, "plantuml.command")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.plantuml.engine, EngineKind::Kroki);
        assert_eq!(config.plantuml.kroki_url, DEFAULT_KROKI_URL);
        assert_eq!(config.plantuml.command, "plantuml");
        assert_eq!(config.plantuml.timeout(), Duration::from_secs(30));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.plantuml.engine, EngineKind::Kroki);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[plantuml]
engine = "command"
command = "/usr/local/bin/plantuml"
args = ["-DPLANTUML_LIMIT_SIZE=8192"]
timeout_secs = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.plantuml.engine, EngineKind::Command);
        assert_eq!(config.plantuml.command, "/usr/local/bin/plantuml");
        assert_eq!(config.plantuml.args, vec!["-DPLANTUML_LIMIT_SIZE=8192".to_owned()]);
        assert_eq!(config.plantuml.timeout_secs, 10);
        // Unset keys keep their defaults
        assert_eq!(config.plantuml.kroki_url, DEFAULT_KROKI_URL);
    }

    #[test]
    fn test_parse_unknown_engine_fails() {
        let toml = r#"
[plantuml]
engine = "graphviz"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!("kroki".parse::<EngineKind>().unwrap(), EngineKind::Kroki);
        assert_eq!("Command".parse::<EngineKind>().unwrap(), EngineKind::Command);
        let err = "jar".parse::<EngineKind>().unwrap_err();
        assert!(err.to_string().contains("jar"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            port: Some(9000),
            engine: Some(EngineKind::Command),
            plantuml_command: Some("java -jar plantuml.jar".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1"); // Unchanged
        assert_eq!(config.plantuml.engine, EngineKind::Command);
        assert_eq!(config.plantuml.command, "java -jar plantuml.jar");
        assert_eq!(config.plantuml.kroki_url, DEFAULT_KROKI_URL); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.plantuml.engine, EngineKind::Kroki);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viktools.toml");
        std::fs::write(
            &path,
            "[plantuml]\nkroki_url = \"http://localhost:8000\"\n",
        )
        .unwrap();

        let settings = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.plantuml.kroki_url, "http://localhost:8000");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viktools.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            kroki_url: Some("kroki.io".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(err.to_string().contains("plantuml.kroki_url"));
    }

    #[test]
    fn test_expand_env_vars_kroki_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VT_TEST_KROKI_URL", "http://kroki.test:8000");
        }

        let toml = r#"
[plantuml]
kroki_url = "${VT_TEST_KROKI_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.plantuml.kroki_url, "http://kroki.test:8000");

        unsafe {
            std::env::remove_var("VT_TEST_KROKI_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_literal_unchanged() {
        let mut config = Config::default();
        config.expand_env_vars().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.plantuml.kroki_url, DEFAULT_KROKI_URL);
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().expect_err("Expected validation to fail");
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default();
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_kroki_url_invalid_scheme() {
        let mut config = Config::default();
        config.plantuml.kroki_url = "ftp://kroki.io".to_owned();
        assert_validation_error(&config, &["kroki_url", "http"]);
    }

    #[test]
    fn test_validate_kroki_url_ignored_for_command_engine() {
        let mut config = Config::default();
        config.plantuml.engine = EngineKind::Command;
        config.plantuml.kroki_url = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_command_empty() {
        let mut config = Config::default();
        config.plantuml.engine = EngineKind::Command;
        config.plantuml.command = "  ".to_owned();
        assert_validation_error(&config, &["plantuml.command", "empty"]);
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = Config::default();
        config.plantuml.timeout_secs = 0;
        assert_validation_error(&config, &["timeout_secs", "greater than 0"]);

        config.plantuml.timeout_secs = 3600;
        assert_validation_error(&config, &["timeout_secs", "600"]);
    }
}
