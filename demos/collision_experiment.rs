//! Runs the collision sweep and prints one line per table size.
//!
//! Usage: `collision_experiment [seed]`. Without a seed the generator is
//! seeded from the OS. Set `RUST_LOG=info` to see per-capacity progress.

use chained_hashtable::{run_experiment, ExperimentConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    env_logger::init();

    let mut rng = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => ChaCha8Rng::seed_from_u64(seed),
            Err(e) => {
                eprintln!("invalid seed {arg:?}: {e}");
                std::process::exit(2);
            }
        },
        None => ChaCha8Rng::from_entropy(),
    };

    let config = ExperimentConfig::default();
    match run_experiment(&config, &mut rng) {
        Ok(report) => print!("{report}"),
        Err(e) => {
            eprintln!("experiment failed: {e}");
            std::process::exit(1);
        }
    }
}
