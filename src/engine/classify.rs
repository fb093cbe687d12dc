//! Status classification.
//!
//! Pure threshold function from post-step CPU and entropy to a discrete
//! alert level. The dashboard's coloring logic keys off the same numeric
//! thresholds independently, so these constants must not drift.

use super::snapshot::Status;

/// CPU percentage above which the host is at least [`Status::Warning`].
pub const CPU_WARNING_THRESHOLD: f64 = 50.0;

/// CPU percentage above which the host is [`Status::Critical`].
pub const CPU_CRITICAL_THRESHOLD: f64 = 80.0;

/// Entropy above which the host is [`Status::Critical`] regardless of CPU.
pub const ENTROPY_CRITICAL_THRESHOLD: f64 = 0.8;

/// Classifies an alert level from one tick's CPU and entropy values.
///
/// Critical overrides warning; entropy alone can escalate to critical
/// (the ransomware signature) even at idle CPU.
#[must_use]
pub fn classify(cpu: f64, entropy: f64) -> Status {
    if cpu > CPU_CRITICAL_THRESHOLD || entropy > ENTROPY_CRITICAL_THRESHOLD {
        Status::Critical
    } else if cpu > CPU_WARNING_THRESHOLD {
        Status::Warning
    } else {
        Status::Secure
    }
}
