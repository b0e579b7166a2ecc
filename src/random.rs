//! Seeded random number generation.
//!
//! Every randomized operation in this crate takes its generator as an
//! explicit `&mut R where R: Rng` argument; nothing reaches for a global
//! source. [`create_rng`] is the one place a generator is built.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a generator from `seed`, or from OS entropy when `None`.
///
/// Two generators built from the same seed produce identical streams,
/// which is what makes seeded runs reproducible.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
