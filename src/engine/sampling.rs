//! Monte Carlo sampling engine
//!
//! Counts how many uniform points of the unit square land inside the quarter
//! circle `x² + y² <= 1`. The boundary is inclusive. Four times the hit ratio
//! estimates π.
//!
//! # Seed derivation
//!
//! Worker `i` seeds its generator with `seed_base + i * SEED_STRIDE` (wrapping).
//! The stride is a large prime, so re-running with the same seed base and
//! worker count reproduces the same streams, while different workers never
//! start from the same state.

use crate::distribution::{uniform::UniformSquare, PointSource};

/// Distance between consecutive worker seeds
pub const SEED_STRIDE: u64 = 1_000_003;

/// Seed for worker `worker` in a round with base `seed_base`
pub fn derive_seed(seed_base: u64, worker: usize) -> u64 {
    seed_base.wrapping_add((worker as u64).wrapping_mul(SEED_STRIDE))
}

/// Draw `range` points seeded with `seed` and count the hits
pub fn sample_local(range: u64, seed: u64) -> u64 {
    let mut source = UniformSquare::with_seed(seed);
    count_hits(&mut source, range)
}

/// Count hits among the next `range` points of `source`
pub fn count_hits<S: PointSource + ?Sized>(source: &mut S, range: u64) -> u64 {
    let mut hits = 0u64;
    for _ in 0..range {
        let (x, y) = source.next_point();
        if x * x + y * y <= 1.0 {
            hits += 1;
        }
    }
    hits
}
