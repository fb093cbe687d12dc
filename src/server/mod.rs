//! Dashboard backend.
//!
//! Owns the engine behind a mutex, advances it on a fixed interval, and
//! publishes each snapshot through a watch channel that feeds the polling
//! and SSE routes. Command handlers and the tick loop serialize on the
//! same lock, so a tick never observes a half-applied mode change.
//!
//! This layer is also the engine's "caller" in the logging sense: it
//! synthesizes dashboard log entries from command confirmations and status
//! transitions, which the engine itself never does.

pub mod routes;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{Analyst, GroqAnalyst, MockAnalyst};
use crate::config::Config;
use crate::engine::Simulator;
use crate::engine::snapshot::{AttackKind, LogEntry, LogLevel, Snapshot, Status};
use crate::error::{CortexError, ServerError};
use crate::observability::metrics;

/// Maximum retained dashboard log entries.
const LOG_FEED_CAP: usize = 200;

/// Bounded in-memory feed of caller-synthesized log entries.
#[derive(Debug, Default)]
struct LogFeed {
    entries: VecDeque<LogEntry>,
}

impl LogFeed {
    fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        if self.entries.len() == LOG_FEED_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    fn recent(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

struct Inner {
    // std::sync::Mutex is intentional: critical sections are short and
    // synchronous, never held across .await points.
    sim: Mutex<Simulator<StdRng>>,
    logs: Mutex<LogFeed>,
    last_status: Mutex<Status>,
    snapshot_tx: tokio::sync::watch::Sender<Snapshot>,
    analyst: Arc<dyn Analyst>,
    started: Instant,
}

/// Shared state behind every route and the tick loop.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Creates the shared state, priming the watch channel with one
    /// immediate tick so subscribers always have a current snapshot.
    #[must_use]
    pub fn new(mut sim: Simulator<StdRng>, analyst: Arc<dyn Analyst>) -> Self {
        let first = sim.tick();
        let status = first.status;
        let (snapshot_tx, _) = tokio::sync::watch::channel(first);
        let state = Self {
            inner: Arc::new(Inner {
                sim: Mutex::new(sim),
                logs: Mutex::new(LogFeed::default()),
                last_status: Mutex::new(status),
                snapshot_tx,
                analyst,
                started: Instant::now(),
            }),
        };
        state.push_log(LogLevel::Sys, "CORTEX telemetry core online.");
        state
    }

    /// Advances the simulation by one tick and publishes the snapshot.
    pub fn advance(&self) -> Snapshot {
        let tick_start = Instant::now();
        let snapshot = self
            .inner
            .sim
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().tick(), |mut sim| sim.tick());

        self.note_status(snapshot.status);
        metrics::record_tick(tick_start.elapsed());
        metrics::set_status(snapshot.status);
        metrics::set_uptime(self.inner.started.elapsed());

        self.inner.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Activates an attack mode and logs the confirmation.
    pub fn inject(&self, kind: AttackKind) -> String {
        let message = self
            .inner
            .sim
            .lock()
            .map_or_else(
                |poisoned| poisoned.into_inner().inject_attack(kind),
                |mut sim| sim.inject_attack(kind),
            );
        metrics::record_attack_injected(kind);
        self.push_log(LogLevel::Warn, message.clone());
        message
    }

    /// Triggers the countermeasure reset and logs the confirmation.
    pub fn defend(&self) -> String {
        let message = self.inner.sim.lock().map_or_else(
            |poisoned| poisoned.into_inner().countermeasure(),
            |mut sim| sim.countermeasure(),
        );
        metrics::record_countermeasure();
        self.push_log(LogLevel::Sys, message.clone());
        message
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> Snapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribes to future snapshots.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Snapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The chart windows and active mode alongside the latest snapshot.
    #[must_use]
    pub fn state_view(&self) -> routes::StateView {
        let (cpu_history, entropy_history, active_attack) = self.inner.sim.lock().map_or_else(
            |poisoned| {
                let sim = poisoned.into_inner();
                (sim.cpu_series(), sim.entropy_series(), sim.active_attack())
            },
            |sim| (sim.cpu_series(), sim.entropy_series(), sim.active_attack()),
        );
        routes::StateView {
            snapshot: self.latest(),
            cpu_history,
            entropy_history,
            active_attack,
        }
    }

    /// Recent dashboard log entries, oldest first.
    #[must_use]
    pub fn recent_logs(&self) -> Vec<LogEntry> {
        self.inner
            .logs
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().recent(), |logs| logs.recent())
    }

    /// The configured analysis backend.
    #[must_use]
    pub fn analyst(&self) -> Arc<dyn Analyst> {
        Arc::clone(&self.inner.analyst)
    }

    fn push_log(&self, level: LogLevel, message: impl Into<String>) {
        if let Ok(mut logs) = self.inner.logs.lock() {
            logs.push(level, message);
        }
    }

    /// Synthesizes a log entry when the alert level changes between ticks.
    fn note_status(&self, status: Status) {
        let changed = self.inner.last_status.lock().is_ok_and(|mut last| {
            let changed = *last != status;
            *last = status;
            changed
        });
        if !changed {
            return;
        }
        match status {
            Status::Secure => self.push_log(LogLevel::Info, "Status returned to SECURE."),
            Status::Warning => {
                self.push_log(LogLevel::Warn, "Status escalated to WARNING: CPU load elevated.");
            }
            Status::Critical => {
                self.push_log(
                    LogLevel::Crit,
                    "Status escalated to CRITICAL: threat signature active.",
                );
            }
        }
    }
}

/// Builds the engine and analyst from configuration.
fn build_state(config: &Config) -> AppState {
    let sim = config.engine.seed.map_or_else(Simulator::new, |seed| {
        Simulator::with_rng(StdRng::seed_from_u64(seed))
    });
    let sim = sim.with_tick_interval_ms(config.server.tick_interval_ms);

    let analyst: Arc<dyn Analyst> = match std::env::var(&config.analysis.api_key_env) {
        Ok(key) if !key.is_empty() => {
            info!(model = %config.analysis.model, "analysis uplink enabled");
            Arc::new(GroqAnalyst::new(&config.analysis, key))
        }
        _ => {
            info!(
                key_env = %config.analysis.api_key_env,
                "no API key set; analysis requests answered by the mock analyst"
            );
            Arc::new(MockAnalyst)
        }
    };

    AppState::new(sim, analyst)
}

/// Spawns the fixed-interval tick task.
///
/// Runs until the cancellation token fires. The first scheduled tick lands
/// one full interval after startup; the priming tick in [`AppState::new`]
/// covers the gap.
pub fn spawn_tick_loop(
    state: AppState,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        ticker.tick().await; // the immediate first fire
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("tick loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let snapshot = state.advance();
                    debug!(cpu = snapshot.cpu, status = ?snapshot.status, "tick");
                }
            }
        }
    })
}

/// Runs the dashboard backend until cancelled.
///
/// # Errors
///
/// Returns a [`ServerError`] if the listener cannot bind, or an I/O error
/// if serving fails.
pub async fn run(config: &Config, cancel: CancellationToken) -> Result<(), CortexError> {
    let state = build_state(config);
    let tick_handle = spawn_tick_loop(
        state.clone(),
        Duration::from_millis(config.server.tick_interval_ms),
        cancel.clone(),
    );

    let router = routes::router(state);
    let listener = TcpListener::bind(&config.server.bind)
        .await
        .map_err(|e| ServerError::BindFailed(format!("{}: {e}", config.server.bind)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| ServerError::BindFailed(e.to_string()))?;
    info!(%local_addr, "dashboard API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .await
        .map_err(ServerError::Io)?;

    cancel.cancel();
    let _ = tick_handle.await;
    debug!("dashboard API shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(
            Simulator::with_rng(StdRng::seed_from_u64(3)),
            Arc::new(MockAnalyst),
        )
    }

    #[test]
    fn priming_tick_populates_latest() {
        let state = state();
        let snapshot = state.latest();
        assert!((2.0..=10.0).contains(&snapshot.cpu));
    }

    #[test]
    fn advance_publishes_to_subscribers() {
        let state = state();
        let rx = state.subscribe();
        let snapshot = state.advance();
        assert!((rx.borrow().cpu - snapshot.cpu).abs() < f64::EPSILON);
    }

    #[test]
    fn inject_and_defend_log_confirmations() {
        let state = state();
        state.inject(AttackKind::Ddos);
        state.defend();
        let logs = state.recent_logs();
        assert!(logs.iter().any(|l| l.message.contains("[INJECT]")));
        assert!(logs.iter().any(|l| l.message.contains("[DEFENSE]")));
    }

    #[test]
    fn status_transition_synthesizes_log() {
        let state = state();
        state.inject(AttackKind::Ransomware);
        state.advance();
        let logs = state.recent_logs();
        assert!(
            logs.iter()
                .any(|l| l.level == LogLevel::Crit && l.message.contains("CRITICAL"))
        );
    }

    #[test]
    fn log_feed_is_bounded() {
        let state = state();
        for _ in 0..LOG_FEED_CAP + 50 {
            state.push_log(LogLevel::Info, "filler");
        }
        assert_eq!(state.recent_logs().len(), LOG_FEED_CAP);
    }

    #[test]
    fn state_view_carries_full_windows() {
        let state = state();
        let view = state.state_view();
        assert_eq!(view.cpu_history.len(), 60);
        assert_eq!(view.entropy_history.len(), 60);
        assert!(view.active_attack.is_none());
    }
}
