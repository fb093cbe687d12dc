//! `serve` command handler.
//!
//! Loads configuration, applies CLI overrides, starts the optional
//! metrics exporter, and runs the dashboard backend until cancelled.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::error::CortexError;
use crate::observability::init_metrics;
use crate::server;

/// Start the dashboard API server.
///
/// # Errors
///
/// Returns a config error if the configuration file is missing or
/// invalid, or a server error if the backend fails to bind or serve.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), CortexError> {
    let mut config = if let Some(ref path) = args.config {
        info!(config = %path.display(), "loading configuration");
        let (config, warnings) = Config::load(path)?;
        for warning in &warnings {
            warn!(path = %warning.path, "{}", warning.message);
        }
        config
    } else {
        Config::default()
    };

    // CLI flags win over the configuration file.
    if let Some(ref bind) = args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(interval) = args.tick_interval_ms {
        config.server.tick_interval_ms = interval;
    }
    if let Some(port) = args.metrics_port {
        config.server.metrics_port = Some(port);
    }

    if let Some(port) = config.server.metrics_port {
        init_metrics(Some(port))?;
        info!(port, "Prometheus metrics endpoint started");
    }

    server::run(&config, cancel).await
}
