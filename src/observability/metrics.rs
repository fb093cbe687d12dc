//! Metrics collection.
//!
//! Prometheus-compatible metrics for the tick loop, command endpoints, and
//! the analysis uplink, with typed convenience functions for recording
//! measurements.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::engine::snapshot::{AttackKind, Status};
use crate::error::CortexError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without an
/// HTTP endpoint (metrics are recorded internally and can be read
/// programmatically).
///
/// # Errors
///
/// Returns `CortexError::Io` if the recorder or HTTP listener cannot be
/// installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), CortexError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| CortexError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!("cortexd_ticks_total", "Total simulation ticks advanced");
    describe_histogram!(
        "cortexd_tick_duration_ms",
        "Tick processing duration in milliseconds"
    );
    describe_counter!(
        "cortexd_attacks_injected_total",
        "Attack injections by kind"
    );
    describe_counter!(
        "cortexd_countermeasures_total",
        "Countermeasure resets triggered"
    );
    describe_gauge!(
        "cortexd_status",
        "Current alert level (1 = active, one series per level)"
    );
    describe_counter!(
        "cortexd_analysis_requests_total",
        "Analysis uplink requests by outcome"
    );
    describe_gauge!("cortexd_uptime_seconds", "Server uptime in seconds");
}

/// Records one completed tick and its duration.
pub fn record_tick(duration: Duration) {
    counter!("cortexd_ticks_total").increment(1);
    histogram!("cortexd_tick_duration_ms").record(duration.as_secs_f64() * 1000.0);
}

/// Records an attack injection.
pub fn record_attack_injected(kind: AttackKind) {
    counter!("cortexd_attacks_injected_total", "kind" => kind.label()).increment(1);
}

/// Records a countermeasure.
pub fn record_countermeasure() {
    counter!("cortexd_countermeasures_total").increment(1);
}

/// Sets the status gauge, zeroing the other levels so exactly one series
/// reads 1.0 at any time.
pub fn set_status(status: Status) {
    for (level, label) in [
        (Status::Secure, "SECURE"),
        (Status::Warning, "WARNING"),
        (Status::Critical, "CRITICAL"),
    ] {
        let value = if level == status { 1.0 } else { 0.0 };
        gauge!("cortexd_status", "level" => label).set(value);
    }
}

/// Records an analysis uplink request by outcome.
pub fn record_analysis_request(outcome: &'static str) {
    counter!("cortexd_analysis_requests_total", "outcome" => outcome).increment(1);
}

/// Sets the server uptime gauge.
pub fn set_uptime(duration: Duration) {
    gauge!("cortexd_uptime_seconds").set(duration.as_secs_f64());
}
