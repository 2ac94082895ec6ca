//! Deterministic simulation RNG and replicate seeding.
//!
//! # Determinism strategy
//!
//! A simulation owns exactly one `SimRng`, built from an explicit `u64` seed.
//! There is no global generator: the driver threads `&mut SimRng` through
//! every draw, so a seed reproduces the same tree bit-for-bit.
//!
//! Replicates in a batch are seeded by:
//!
//!   seed = base_seed XOR ((replicate + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive replicate indices uniformly across the seed
//! space.  Replicates never share RNG state, so they can run on any thread
//! in any order and still produce the same trees.

use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed for replicate `replicate` of a batch started from `base_seed`.
///
/// The `+ 1` keeps replicate 0 from reusing `base_seed` verbatim.
#[inline]
pub fn replicate_seed(base_seed: u64, replicate: u64) -> u64 {
    base_seed ^ replicate.wrapping_add(1).wrapping_mul(MIXING_CONSTANT)
}

/// Simulation-level RNG: exponential waiting times, uniform event selection
/// and uniform lineage picks.
///
/// Used only in single-threaded contexts.  For parallel replicates give each
/// replicate its own `SimRng` seeded with [`replicate_seed`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a fresh seed from OS entropy.
    ///
    /// Callers should report the returned seed so the run can be repeated.
    pub fn entropy_seed() -> u64 {
        rand::thread_rng().r#gen()
    }

    /// Uniform draw on `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }

    /// Exponential draw with the given `rate` (mean `1 / rate`).
    ///
    /// Returns `None` unless `rate` is finite and strictly positive.
    #[inline]
    pub fn exponential(&mut self, rate: f64) -> Option<f64> {
        if !(rate.is_finite() && rate > 0.0) {
            return None;
        }
        let exp = Exp::new(rate).ok()?;
        Some(exp.sample(&mut self.0))
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    /// Panics if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Two distinct indices in `0..len`, every unordered pair equally likely.
    ///
    /// Returns `None` if `len < 2`.
    pub fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let picked = index::sample(&mut self.0, len, 2);
        Some((picked.index(0), picked.index(1)))
    }
}
