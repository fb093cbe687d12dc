//! Configuration loading and validation.
//!
//! An optional YAML file tunes the server, engine, and analysis uplink.
//! Every field has a default, so the daemon runs with no file at all.
//! Validation collects issues rather than failing on the first one;
//! warnings are logged, errors abort with a configuration error.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Severity, ValidationIssue};

/// Minimum accepted tick interval. Anything faster is a typo, not a demo.
const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Engine settings.
    #[serde(default)]
    pub engine: EngineSettings,
    /// Analysis uplink settings.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    /// Bind address for the dashboard API.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Milliseconds between simulation ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Optional Prometheus exporter port on localhost.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            tick_interval_ms: default_tick_interval_ms(),
            metrics_port: None,
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// Optional RNG seed for reproducible runs. Absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Analysis uplink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSettings {
    /// OpenAI-compatible chat-completions base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent upstream.
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key. The key
    /// itself never appears in configuration files or logs.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7717".to_string()
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the path does not exist,
    /// [`ConfigError::ParseError`] on malformed YAML, and
    /// [`ConfigError::ValidationError`] when any error-severity issue is
    /// found. Warning-severity issues are returned alongside the config.
    pub fn load(path: &Path) -> Result<(Self, Vec<ValidationIssue>), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let issues = config.validate();
        let (errors, warnings): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);

        if errors.is_empty() {
            Ok((config, warnings))
        } else {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors,
            })
        }
    }

    /// Checks field values, collecting every issue found.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ValidationIssue {
                path: "server.bind".to_string(),
                message: format!("'{}' is not a valid socket address", self.server.bind),
                severity: Severity::Error,
            });
        }

        if self.server.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            issues.push(ValidationIssue {
                path: "server.tick_interval_ms".to_string(),
                message: format!("must be at least {MIN_TICK_INTERVAL_MS}"),
                severity: Severity::Error,
            });
        }

        if self.analysis.model.is_empty() {
            issues.push(ValidationIssue {
                path: "analysis.model".to_string(),
                message: "model must not be empty".to_string(),
                severity: Severity::Error,
            });
        }

        if self.analysis.base_url.is_empty() {
            issues.push(ValidationIssue {
                path: "analysis.base_url".to_string(),
                message: "base_url must not be empty".to_string(),
                severity: Severity::Error,
            });
        } else if !self.analysis.base_url.starts_with("http") {
            issues.push(ValidationIssue {
                path: "analysis.base_url".to_string(),
                message: "base_url does not look like an HTTP endpoint".to_string(),
                severity: Severity::Warning,
            });
        }

        if self.server.tick_interval_ms > 10_000 {
            issues.push(ValidationIssue {
                path: "server.tick_interval_ms".to_string(),
                message: "intervals above 10s make the dashboard feel frozen".to_string(),
                severity: Severity::Warning,
            });
        }

        issues
    }
}
