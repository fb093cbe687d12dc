//! Physics step.
//!
//! Advances the continuous state variables (CPU, entropy, integrity) by one
//! tick. Idle mode is a bounded random walk that self-heals into a low
//! band; each attack overrides the baselines with its own profile.

use rand::Rng;

use super::snapshot::AttackKind;

/// Idle CPU band lower bound (percent).
pub const IDLE_CPU_MIN: f64 = 2.0;
/// Idle CPU band upper bound (percent).
pub const IDLE_CPU_MAX: f64 = 10.0;
/// Idle entropy band lower bound.
pub const IDLE_ENTROPY_MIN: f64 = 0.1;
/// Idle entropy band upper bound.
pub const IDLE_ENTROPY_MAX: f64 = 0.3;

/// Seed value for the CPU history at construction and after a countermeasure.
pub const IDLE_CPU_SEED: f64 = 5.0;
/// Seed value for the entropy history.
pub const IDLE_ENTROPY_SEED: f64 = 0.2;

/// Center of the cryptominer CPU plateau.
const MINER_CPU_CENTER: f64 = 85.0;
/// Amplitude of the cryptominer sinusoid.
const MINER_CPU_AMPLITUDE: f64 = 10.0;
/// Period divisor for the sinusoid, in milliseconds of simulated time.
const MINER_PERIOD_MS: f64 = 500.0;

/// Continuous state produced by one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepValues {
    pub cpu: f64,
    pub entropy: f64,
    pub integrity: f64,
}

/// Advances CPU/entropy/integrity one tick from the given baselines.
///
/// `elapsed_ms` is the engine's notion of elapsed simulated time, used only
/// to phase the cryptominer sinusoid so the plateau reads as "pegged but
/// noisy" on the chart.
pub fn step<R: Rng>(
    rng: &mut R,
    attack: Option<AttackKind>,
    cpu_baseline: f64,
    entropy_baseline: f64,
    elapsed_ms: f64,
) -> StepValues {
    match attack {
        None => {
            let cpu = (cpu_baseline + rng.random_range(-2.5..2.5)).clamp(IDLE_CPU_MIN, IDLE_CPU_MAX);
            let entropy = (entropy_baseline + rng.random_range(-0.005..0.005))
                .clamp(IDLE_ENTROPY_MIN, IDLE_ENTROPY_MAX);
            StepValues {
                cpu,
                entropy,
                integrity: 100.0,
            }
        }
        Some(AttackKind::Cryptominer) => StepValues {
            cpu: MINER_CPU_AMPLITUDE.mul_add((elapsed_ms / MINER_PERIOD_MS).sin(), MINER_CPU_CENTER),
            entropy: 0.6,
            integrity: 65.0,
        },
        Some(AttackKind::Ransomware) => StepValues {
            cpu: rng.random_range(60.0..80.0),
            // Must clear the critical entropy threshold every tick.
            entropy: rng.random_range(0.95..1.0),
            integrity: 40.0,
        },
        Some(AttackKind::Ddos) => StepValues {
            cpu: rng.random_range(95.0..100.0),
            // A flood saturates the CPU but leaves filesystem entropy alone.
            entropy: entropy_baseline,
            integrity: 50.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn idle_stays_in_band() {
        let mut rng = rng();
        let mut cpu = IDLE_CPU_SEED;
        let mut entropy = IDLE_ENTROPY_SEED;
        for _ in 0..1000 {
            let values = step(&mut rng, None, cpu, entropy, 0.0);
            assert!((IDLE_CPU_MIN..=IDLE_CPU_MAX).contains(&values.cpu));
            assert!((IDLE_ENTROPY_MIN..=IDLE_ENTROPY_MAX).contains(&values.entropy));
            assert!((values.integrity - 100.0).abs() < f64::EPSILON);
            cpu = values.cpu;
            entropy = values.entropy;
        }
    }

    #[test]
    fn idle_recovers_from_out_of_band_baseline() {
        let mut rng = rng();
        // Baseline left high by a cleared attack; one idle step clamps it back.
        let values = step(&mut rng, None, 97.0, 0.99, 0.0);
        assert!(values.cpu <= IDLE_CPU_MAX);
        assert!(values.entropy <= IDLE_ENTROPY_MAX);
    }

    #[test]
    fn cryptominer_plateau_band() {
        let mut rng = rng();
        for tick in 0..600 {
            let values = step(
                &mut rng,
                Some(AttackKind::Cryptominer),
                5.0,
                0.2,
                f64::from(tick) * 1000.0,
            );
            assert!(
                (MINER_CPU_CENTER - MINER_CPU_AMPLITUDE..=MINER_CPU_CENTER + MINER_CPU_AMPLITUDE)
                    .contains(&values.cpu)
            );
            assert!((values.entropy - 0.6).abs() < f64::EPSILON);
            assert!((values.integrity - 65.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn cryptominer_oscillates() {
        let mut rng = rng();
        let a = step(&mut rng, Some(AttackKind::Cryptominer), 5.0, 0.2, 0.0);
        // Quarter period later the sinusoid is at its crest.
        let b = step(
            &mut rng,
            Some(AttackKind::Cryptominer),
            5.0,
            0.2,
            MINER_PERIOD_MS * std::f64::consts::FRAC_PI_2,
        );
        assert!((a.cpu - MINER_CPU_CENTER).abs() < 1e-9);
        assert!((b.cpu - (MINER_CPU_CENTER + MINER_CPU_AMPLITUDE)).abs() < 1e-9);
    }

    #[test]
    fn ransomware_bands() {
        let mut rng = rng();
        for _ in 0..1000 {
            let values = step(&mut rng, Some(AttackKind::Ransomware), 5.0, 0.2, 0.0);
            assert!((60.0..80.0).contains(&values.cpu));
            assert!((0.95..1.0).contains(&values.entropy));
            assert!((values.integrity - 40.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ddos_pegs_cpu_and_leaves_entropy() {
        let mut rng = rng();
        for _ in 0..1000 {
            let values = step(&mut rng, Some(AttackKind::Ddos), 5.0, 0.27, 0.0);
            assert!((95.0..100.0).contains(&values.cpu));
            assert!((values.entropy - 0.27).abs() < f64::EPSILON);
            assert!((values.integrity - 50.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let va = step(&mut a, None, 5.0, 0.2, 0.0);
            let vb = step(&mut b, None, 5.0, 0.2, 0.0);
            assert_eq!(va, vb);
        }
    }
}
