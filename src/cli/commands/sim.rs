//! `sim` command handler.
//!
//! Runs the engine headless for a fixed number of ticks and prints each
//! snapshot to stdout. With `--seed` the run is fully reproducible, which
//! makes this the quickest way to eyeball an attack's telemetry shape.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::args::{OutputFormat, SimArgs};
use crate::engine::Simulator;
use crate::error::CortexError;

/// Run the simulation headless and print snapshots.
///
/// # Errors
///
/// Returns a JSON error if a snapshot fails to serialize.
pub fn run(args: &SimArgs) -> Result<(), CortexError> {
    let mut sim = args.seed.map_or_else(Simulator::new, |seed| {
        Simulator::with_rng(StdRng::seed_from_u64(seed))
    });

    if let Some(attack) = args.attack {
        let message = sim.inject_attack(attack.into());
        if args.format == OutputFormat::Human {
            println!("{message}");
        }
    }

    for tick in 0..args.ticks {
        let snapshot = sim.tick();
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&snapshot)?),
            OutputFormat::Human => {
                println!(
                    "tick {tick:>4}  cpu {:6.2}%  ram {:6.2}%  entropy {:.3}  integrity {:>3.0}  {:?}",
                    snapshot.cpu,
                    snapshot.ram,
                    snapshot.entropy,
                    snapshot.integrity,
                    snapshot.status
                );
            }
        }
    }

    Ok(())
}
