// Seeded randomness for the stochastic pipeline steps.
//
// Each step (per-tier sampling, ignorant shuffles, priority draws) gets its
// own StdRng derived from the run seed and a fixed stream id, so adding
// draws to one step never shifts the outcome of another.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Stream ids for the pipeline's stochastic steps.
pub mod stream {
    pub const SAMPLE_LOW: u64 = 1;
    pub const SAMPLE_MID: u64 = 2;
    pub const SAMPLE_HIGH: u64 = 3;
    pub const IGNORANT_LOW: u64 = 11;
    pub const IGNORANT_MID: u64 = 12;
    pub const IGNORANT_HIGH: u64 = 13;
    pub const PRIORITY: u64 = 21;
}

/// Golden-ratio increment, spreads stream ids across the seed space.
const STREAM_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// RNG for one step. `None` seeds from the operating system, which keeps
/// the run internally consistent but not reproducible.
pub fn step_rng(seed: Option<u64>, stream_id: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream_id.wrapping_mul(STREAM_SPREAD))),
        None => StdRng::from_os_rng(),
    }
}
