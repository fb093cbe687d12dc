//! Property tests over arbitrary command sequences.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use cortexd::engine::Simulator;
use cortexd::engine::history::HISTORY_LEN;
use cortexd::engine::snapshot::{AttackKind, Status};

#[derive(Debug, Clone, Copy)]
enum Op {
    Tick,
    Inject(AttackKind),
    Defend,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Tick),
        1 => Just(Op::Inject(AttackKind::Cryptominer)),
        1 => Just(Op::Inject(AttackKind::Ransomware)),
        1 => Just(Op::Inject(AttackKind::Ddos)),
        1 => Just(Op::Defend),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_under_any_command_sequence(
        seed in any::<u64>(),
        ops in proptest::collection::vec(op_strategy(), 1..200),
    ) {
        let mut sim = Simulator::with_rng(StdRng::seed_from_u64(seed));
        for op in ops {
            match op {
                Op::Inject(kind) => {
                    sim.inject_attack(kind);
                }
                Op::Defend => {
                    sim.countermeasure();
                }
                Op::Tick => {
                    let snap = sim.tick();

                    prop_assert!(snap.cpu >= 0.0 && snap.cpu <= 100.0);
                    prop_assert!(snap.entropy >= 0.0 && snap.entropy <= 1.0);
                    prop_assert!(snap.integrity >= 0.0 && snap.integrity <= 100.0);
                    prop_assert!((snap.ram - (15.0 + 0.2 * snap.cpu)).abs() < 1e-9);

                    // Status agrees with the thresholds.
                    let expected = if snap.cpu > 80.0 || snap.entropy > 0.8 {
                        Status::Critical
                    } else if snap.cpu > 50.0 {
                        Status::Warning
                    } else {
                        Status::Secure
                    };
                    prop_assert_eq!(snap.status, expected);

                    // Process table is capped and sorted hottest-first.
                    prop_assert!(snap.processes.len() <= 8);
                    for pair in snap.processes.windows(2) {
                        prop_assert!(pair[0].cpu >= pair[1].cpu);
                    }

                    prop_assert_eq!(snap.network_traffic.len(), 1);
                }
            }
            prop_assert_eq!(sim.cpu_series().len(), HISTORY_LEN);
            prop_assert_eq!(sim.entropy_series().len(), HISTORY_LEN);
        }
    }

    #[test]
    fn defended_engine_matches_fresh_engine_shape(seed in any::<u64>()) {
        let mut attacked = Simulator::with_rng(StdRng::seed_from_u64(seed));
        attacked.inject_attack(AttackKind::Ransomware);
        for _ in 0..30 {
            attacked.tick();
        }
        attacked.countermeasure();

        // Post-defense windows are flat at the idle seeds, exactly like a
        // fresh engine's.
        let fresh = Simulator::with_rng(StdRng::seed_from_u64(seed));
        prop_assert_eq!(attacked.cpu_series(), fresh.cpu_series());
        prop_assert_eq!(attacked.entropy_series(), fresh.entropy_series());
        prop_assert_eq!(attacked.active_attack(), None);
    }
}
