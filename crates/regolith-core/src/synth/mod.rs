//! Seeded stand-ins for the upstream sensors: a synthetic height field and
//! simulated spectrometry. Only the demo binary and tests use these; the
//! planning stages take their inputs as given.
pub mod spectrometry;
pub mod terrain;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use spectrometry::{generate_samples, simulate_composition};
pub use terrain::simulate_terrain;

/// Deterministic RNG for the synthetic collaborators.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
