//! Fixed-length telemetry history.
//!
//! A ring buffer holding the most recent N samples of one signal. Pushing a
//! new sample drops the oldest, so the length never changes after
//! construction. The dashboard charts consume the full window every tick.

use std::collections::VecDeque;

/// Number of samples retained per signal (one minute at one tick per second).
pub const HISTORY_LEN: usize = 60;

/// Fixed-length sliding window over one telemetry signal.
///
/// Invariant: `len()` equals the capacity passed at construction at all
/// times. `push` is O(1) and never reallocates.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl History {
    /// Creates a history of `capacity` samples, all set to `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. An empty window would make the next
    /// baseline read undefined, so this is rejected at construction rather
    /// than surfacing as an arithmetic edge case at tick time.
    #[must_use]
    pub fn seeded(capacity: usize, seed: f64) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        let mut samples = VecDeque::with_capacity(capacity);
        samples.extend(std::iter::repeat_n(seed, capacity));
        Self { samples, capacity }
    }

    /// Pushes a new sample, dropping the oldest.
    pub fn push(&mut self, value: f64) {
        self.samples.pop_front();
        self.samples.push_back(value);
        debug_assert_eq!(self.samples.len(), self.capacity);
    }

    /// Returns the most recent sample.
    #[must_use]
    pub fn latest(&self) -> f64 {
        // Non-empty by construction.
        *self.samples.back().unwrap_or(&0.0)
    }

    /// Resets every sample to `seed`, keeping the length unchanged.
    pub fn reset(&mut self, seed: f64) {
        for sample in &mut self.samples {
            *sample = seed;
        }
    }

    /// Number of retained samples (constant after construction).
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copies the window oldest-first into a `Vec` for serialization.
    #[must_use]
    pub fn to_series(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
