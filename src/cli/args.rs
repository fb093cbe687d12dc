//! CLI argument definitions.
//!
//! All Clap derive structs for `cortexd` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::engine::snapshot::AttackKind;

// ============================================================================
// Root CLI
// ============================================================================

/// Cyber-immune host telemetry simulator and dashboard backend.
#[derive(Parser, Debug)]
#[command(name = "cortexd", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "CORTEXD_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard API server.
    Serve(ServeArgs),

    /// Run the simulation headless and print snapshots.
    Sim(SimArgs),

    /// Validate configuration files without serving.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Serve Command
// ============================================================================

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to YAML configuration file.
    #[arg(short, long, env = "CORTEXD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address, overriding the configuration file.
    #[arg(long)]
    pub bind: Option<String>,

    /// Milliseconds between simulation ticks, overriding the configuration.
    #[arg(long)]
    pub tick_interval_ms: Option<u64>,

    /// Expose Prometheus metrics on this localhost port.
    #[arg(long)]
    pub metrics_port: Option<u16>,
}

// ============================================================================
// Sim Command
// ============================================================================

/// Arguments for `sim`.
#[derive(Args, Debug)]
pub struct SimArgs {
    /// Number of ticks to run.
    #[arg(long, default_value_t = 60)]
    pub ticks: u64,

    /// Inject this attack before the first tick.
    #[arg(long)]
    pub attack: Option<AttackArg>,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Attack signature selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AttackArg {
    /// Stealthy cryptocurrency miner.
    Cryptominer,
    /// File-system encryption sweep.
    Ransomware,
    /// SYN flood from spoofed sources.
    Ddos,
}

impl From<AttackArg> for AttackKind {
    fn from(arg: AttackArg) -> Self {
        match arg {
            AttackArg::Cryptominer => Self::Cryptominer,
            AttackArg::Ransomware => Self::Ransomware,
            AttackArg::Ddos => Self::Ddos,
        }
    }
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_with_config() {
        let cli = Cli::try_parse_from(["cortexd", "serve", "--config", "cortexd.yaml"]);
        assert!(cli.is_ok(), "Failed to parse: {cli:?}");
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["cortexd", "serve"]).unwrap();
        if let Commands::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.bind.is_none());
            assert!(args.metrics_port.is_none());
            return;
        }
        panic!("Expected ServeArgs");
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "cortexd",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--tick-interval-ms",
            "250",
            "--metrics-port",
            "9100",
        ])
        .unwrap();
        if let Commands::Serve(args) = cli.command {
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
            assert_eq!(args.tick_interval_ms, Some(250));
            assert_eq!(args.metrics_port, Some(9100));
            return;
        }
        panic!("Expected ServeArgs");
    }

    #[test]
    fn test_sim_defaults() {
        let cli = Cli::try_parse_from(["cortexd", "sim"]).unwrap();
        if let Commands::Sim(args) = cli.command {
            assert_eq!(args.ticks, 60);
            assert!(args.attack.is_none());
            assert_eq!(args.format, OutputFormat::Human);
            return;
        }
        panic!("Expected SimArgs");
    }

    #[test]
    fn test_sim_attacks_parse() {
        for attack in ["cryptominer", "ransomware", "ddos"] {
            let cli = Cli::try_parse_from(["cortexd", "sim", "--attack", attack]);
            assert!(cli.is_ok(), "Failed to parse attack={attack}");
        }
    }

    #[test]
    fn test_sim_unknown_attack_rejected() {
        let cli = Cli::try_parse_from(["cortexd", "sim", "--attack", "worm"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_validate_requires_files() {
        let result = Cli::try_parse_from(["cortexd", "validate"]);
        assert!(result.is_err(), "Expected error for missing files");
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["cortexd", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["cortexd", "--color", variant, "sim"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["cortexd", "-vvv", "sim"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["cortexd", "--quiet", "serve"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_help_output() {
        let result = Cli::try_parse_from(["cortexd", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let result = Cli::try_parse_from(["cortexd", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_attack_arg_converts() {
        assert_eq!(AttackKind::from(AttackArg::Ddos), AttackKind::Ddos);
        assert_eq!(
            AttackKind::from(AttackArg::Cryptominer),
            AttackKind::Cryptominer
        );
        assert_eq!(
            AttackKind::from(AttackArg::Ransomware),
            AttackKind::Ransomware
        );
    }
}
