//! Error types for `cortexd`
//!
//! One aggregate error per subsystem plus Unix-convention exit codes used
//! by the CLI dispatcher.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `cortexd` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Server error (bind failure, transport failure)
    pub const SERVER_ERROR: i32 = 4;

    /// Analysis uplink error (upstream LLM unreachable or malformed)
    pub const ANALYSIS_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `cortexd` operations.
///
/// Aggregates all domain-specific errors and provides a unified exit-code
/// mapping for the CLI.
#[derive(Debug, Error)]
pub enum CortexError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Analysis uplink error
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CortexError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::Analysis(_) => ExitCode::ANALYSIS_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., `"server.tick_interval_ms"`)
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Validation failure that prevents the configuration from being used
    Error,
    /// Potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listener
    #[error("bind failed: {0}")]
    BindFailed(String),

    /// I/O error during server operations
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Analysis Errors
// ============================================================================

/// Analysis uplink errors.
///
/// The simulation engine itself has no failure modes; these cover only the
/// external LLM boundary.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Upstream request failed (network, TLS, timeout)
    #[error("analysis uplink failed: {0}")]
    Uplink(String),

    /// Upstream returned a non-success status
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code from the upstream API
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// Upstream response could not be decoded
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `cortexd` operations.
pub type Result<T> = std::result::Result<T, CortexError>;

// ============================================================================
// Tests
// ============================================================================
