//! `validate` command handler.
//!
//! Checks configuration files without starting the server. All files are
//! checked even when an early one fails, so one run reports everything.

use tracing::{info, warn};

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{ConfigError, CortexError};

/// Validate configuration files without serving.
///
/// # Errors
///
/// Returns the first configuration error encountered after all files have
/// been checked.
pub fn run(args: &ValidateArgs) -> Result<(), CortexError> {
    let mut first_error: Option<ConfigError> = None;

    for path in &args.files {
        match Config::load(path) {
            Ok((_, warnings)) => {
                match args.format {
                    OutputFormat::Human => {
                        for warning in &warnings {
                            warn!(file = %path.display(), "{warning}");
                        }
                        println!("{}: ok ({} warnings)", path.display(), warnings.len());
                    }
                    OutputFormat::Json => {
                        let warnings: Vec<String> =
                            warnings.iter().map(ToString::to_string).collect();
                        println!(
                            "{}",
                            serde_json::json!({
                                "file": path.display().to_string(),
                                "valid": true,
                                "warnings": warnings,
                            })
                        );
                    }
                }
                info!(file = %path.display(), "configuration valid");
            }
            Err(err) => {
                match args.format {
                    OutputFormat::Human => println!("{}: {err}", path.display()),
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::json!({
                                "file": path.display().to_string(),
                                "valid": false,
                                "error": err.to_string(),
                            })
                        );
                    }
                }
                first_error.get_or_insert(err);
            }
        }
    }

    first_error.map_or(Ok(()), |err| Err(err.into()))
}
