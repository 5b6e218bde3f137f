//! Stable Match - Binary Entry Point
//!
//! Builds a seeded random instance, matches it and verifies the result.
//!
//! ```bash
//! RUST_LOG=debug cargo run -- 200 42   # size, seed
//! ```

use std::process::ExitCode;

use stable_match::engine::{is_stable, MatchingEngine, Stability};
use stable_match::preferences::{init_stores, UniformRandom};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_SIZE: usize = 100;
const DEFAULT_SEED: u64 = 42;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let size = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SIZE);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    info!("Generating {} members per side (seed={})", size, seed);
    let mut generator = UniformRandom::seeded(seed);
    let (set_a, set_b) = init_stores(size, &mut generator);

    let mut engine = MatchingEngine::new();
    let outcome = match engine.run(&set_a, &set_b) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Matching failed: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Matched {} pairs in {} rounds ({} proposals)",
        outcome.pairing.len(),
        outcome.rounds,
        outcome.proposals
    );

    match outcome.pairing.fingerprint_hex() {
        Ok(hex) => info!("Pairing fingerprint: {}", hex),
        Err(err) => error!("Fingerprint failed: {}", err),
    }

    match is_stable(&set_a, &set_b, &outcome.pairing) {
        Ok(Stability::Stable) => {
            info!("Pairing is stable");
            ExitCode::SUCCESS
        }
        Ok(Stability::Unstable(blocking)) => {
            error!("Pairing is unstable: {}", blocking);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("Verification failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
