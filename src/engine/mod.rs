//! Telemetry simulation engine.
//!
//! The engine is a small state machine advanced by [`Simulator::tick`]: one
//! physics step, a history push, status classification, and derivation of
//! the process table and one synthetic packet. Attack and defense commands
//! only flip the mode consumed by the next tick.
//!
//! All randomness flows through an injectable RNG so every derived signal
//! can be tested with a seeded sequence. The engine has no failure modes:
//! inputs are closed enums, arithmetic is clamped, and the only invariant
//! that could be violated (an empty history window) is rejected at
//! construction.

pub mod classify;
pub mod history;
pub mod packet;
pub mod physics;
pub mod process;
pub mod snapshot;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use history::{HISTORY_LEN, History};
use physics::{IDLE_CPU_SEED, IDLE_ENTROPY_SEED};
use snapshot::{AttackKind, Process, Snapshot};

/// RAM baseline (percent) for the cosmetic affine RAM signal.
const RAM_BASE: f64 = 15.0;
/// CPU coefficient for the RAM signal.
const RAM_PER_CPU: f64 = 0.2;

/// The simulated host.
///
/// Owns all mutable state: two 60-sample history windows, the active attack
/// mode, the benign base process table, and the RNG. One instance per
/// simulated host; calls require external serialization when shared (the
/// HTTP layer wraps the engine in a mutex and treats tick/inject/defense as
/// a unit).
#[derive(Debug)]
pub struct Simulator<R: Rng = StdRng> {
    cpu_history: History,
    entropy_history: History,
    attack: Option<AttackKind>,
    base_processes: Vec<Process>,
    rng: R,
    ticks: u64,
    tick_interval_ms: u64,
}

impl Simulator<StdRng> {
    /// Creates a simulator with OS-seeded randomness and a one-second
    /// nominal tick.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for Simulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Simulator<R> {
    /// Creates a simulator with the given RNG. Tests pass a seeded
    /// [`StdRng`] to make every tick reproducible.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            cpu_history: History::seeded(HISTORY_LEN, IDLE_CPU_SEED),
            entropy_history: History::seeded(HISTORY_LEN, IDLE_ENTROPY_SEED),
            attack: None,
            base_processes: process::base_table(),
            rng,
            ticks: 0,
            tick_interval_ms: 1000,
        }
    }

    /// Overrides the nominal tick interval used to phase time-keyed
    /// signals (the cryptominer sinusoid). Does not change how often the
    /// caller actually ticks.
    #[must_use]
    pub const fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// The currently active attack, if any.
    #[must_use]
    pub const fn active_attack(&self) -> Option<AttackKind> {
        self.attack
    }

    /// Number of ticks advanced since construction.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The CPU history window, oldest sample first.
    #[must_use]
    pub fn cpu_series(&self) -> Vec<f64> {
        self.cpu_history.to_series()
    }

    /// The entropy history window, oldest sample first.
    #[must_use]
    pub fn entropy_series(&self) -> Vec<f64> {
        self.entropy_history.to_series()
    }

    /// Advances the simulation by one step and returns the snapshot.
    ///
    /// Always succeeds; attack and defense commands only take effect here,
    /// on the tick after they were issued.
    pub fn tick(&mut self) -> Snapshot {
        #[allow(clippy::cast_precision_loss)]
        let elapsed_ms = (self.ticks * self.tick_interval_ms) as f64;

        let values = physics::step(
            &mut self.rng,
            self.attack,
            self.cpu_history.latest(),
            self.entropy_history.latest(),
            elapsed_ms,
        );

        self.cpu_history.push(values.cpu);
        self.entropy_history.push(values.entropy);
        self.ticks += 1;

        let status = classify::classify(values.cpu, values.entropy);
        let processes = process::derive(&self.base_processes, values.cpu, self.attack);
        let packet = packet::generate(&mut self.rng, self.attack);

        Snapshot {
            cpu: values.cpu,
            ram: RAM_PER_CPU.mul_add(values.cpu, RAM_BASE),
            entropy: values.entropy,
            integrity: values.integrity,
            processes,
            network_traffic: vec![packet],
            logs: Vec::new(),
            status,
        }
    }

    /// Activates an attack mode, replacing any currently active one.
    ///
    /// Takes effect on the next [`tick`](Self::tick). Returns a
    /// confirmation string for the caller to log; the engine itself never
    /// synthesizes log entries.
    pub fn inject_attack(&mut self, kind: AttackKind) -> String {
        self.attack = Some(kind);
        format!("[INJECT] Initiating {kind} sequence...")
    }

    /// Clears the attack mode and resets both history windows to their
    /// idle seeds. The reset is abrupt rather than a decay so a defense
    /// reads as a clean slate on every chart.
    pub fn countermeasure(&mut self) -> String {
        self.attack = None;
        self.cpu_history.reset(IDLE_CPU_SEED);
        self.entropy_history.reset(IDLE_ENTROPY_SEED);
        "[DEFENSE] CORTEX immune response triggered. Threat neutralized.".to_string()
    }
}
