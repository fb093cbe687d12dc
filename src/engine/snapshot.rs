//! Snapshot value types.
//!
//! Everything the engine hands back per tick, serialized in the exact
//! field shapes the dashboard and the analysis endpoint expect. Snapshots
//! are immutable once returned; the engine keeps no reference to them.

use serde::{Deserialize, Serialize};

/// Synthetic threat scenario. Mutually exclusive; the absence of an attack
/// is modeled as `Option::None` on the engine rather than a fourth variant,
/// so every derivation site is forced to handle the idle case explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttackKind {
    /// CPU pegged on a noisy plateau, outbound stratum traffic.
    Cryptominer,
    /// High entropy burst with encryption-shaped processes.
    Ransomware,
    /// CPU saturation and spoofed SYN flood traffic.
    Ddos,
}

impl AttackKind {
    /// Wire/display label, matching the dashboard's vocabulary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cryptominer => "CRYPTOMINER",
            Self::Ransomware => "RANSOMWARE",
            Self::Ddos => "DDOS",
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete alert level derived from CPU and entropy each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Idle band, nothing suspicious.
    Secure,
    /// Elevated CPU.
    Warning,
    /// Pegged CPU or entropy spike.
    Critical,
}

/// Scheduling state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessState {
    Running,
    Sleeping,
    Zombie,
}

/// Whether a process belongs to the benign base table or was injected by
/// an active attack. Synthetic processes are purged, not hidden, once the
/// engine returns to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessOrigin {
    Benign,
    Synthetic,
}

/// One row of the simulated process table. Identity key is `pid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub pid: u32,
    pub name: String,
    pub user: String,
    pub cpu: f64,
    pub status: ProcessState,
    pub origin: ProcessOrigin,
}

/// One synthetic network packet, freshly generated every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub id: String,
    pub timestamp: String,
    pub src: String,
    pub dst: String,
    pub proto: String,
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

/// Log severity for caller-synthesized entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Info,
    Warn,
    Crit,
    Sys,
}

/// A dashboard log line. The engine never creates these; the serving layer
/// synthesizes them from snapshots and command confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// The full telemetry bundle produced by one tick.
///
/// `logs` is always empty in engine output; it exists so the serialized
/// shape matches what the rendering layer and analysis endpoint consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// CPU load percentage. Idle band [2, 10]; attacks may pin it higher.
    pub cpu: f64,
    /// Cosmetic RAM signal, affine in CPU.
    pub ram: f64,
    /// Synthetic 0–1 filesystem-randomness stand-in.
    pub entropy: f64,
    /// Synthetic 0–100 health score.
    pub integrity: f64,
    /// At most eight rows, sorted by CPU descending.
    pub processes: Vec<Process>,
    /// Exactly one packet per tick.
    pub network_traffic: Vec<Packet>,
    /// Always empty; log synthesis is the caller's responsibility.
    pub logs: Vec<LogEntry>,
    /// Alert level classified from this tick's CPU and entropy.
    pub status: Status,
}
