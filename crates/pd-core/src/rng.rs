//! The run-wide random number generator.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded once from `Params::seed` (or a
//! caller-provided seed).  It carries two `SmallRng` streams:
//!
//! | Stream    | Used for                                              |
//! |-----------|-------------------------------------------------------|
//! | `uniform` | uniform draws, Bernoulli trials, shuffles, subsets    |
//! | `dist`    | `rand_distr` sampling (Poisson, Normal)               |
//!
//! The `dist` stream is seeded once from the master seed mixed with
//! [`DISTRIBUTION_STREAM`], so the two never interleave and a fixed seed
//! reproduces the whole run.  Nothing is reseeded per agent or per step.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Offset mixed into the master seed to seed the distribution stream.
pub const DISTRIBUTION_STREAM: u64 = 1;

pub struct SimRng {
    uniform: SmallRng,
    dist:    SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng {
            uniform: SmallRng::seed_from_u64(seed),
            dist:    SmallRng::seed_from_u64(seed ^ DISTRIBUTION_STREAM.wrapping_mul(MIXING_CONSTANT)),
        }
    }

    /// A fresh seed from OS entropy, for runs configured without one.
    /// Log it if the run must be reproducible later.
    pub fn entropy_seed() -> u64 {
        rand::random()
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.uniform.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.uniform.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.uniform);
    }

    /// `min(amount, len)` distinct indices from `0..len`, in random order.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.uniform, len, amount.min(len)).into_vec()
    }

    /// Poisson draw with the given mean.  Non-positive or non-finite means
    /// yield 0.
    pub fn poisson(&mut self, mean: f64) -> usize {
        match Poisson::new(mean) {
            Ok(dist) => {
                let draw: f64 = dist.sample(&mut self.dist);
                draw as usize
            }
            Err(_) => 0,
        }
    }

    /// Normal draw.  A negative or non-finite `sd` returns `mean` unchanged.
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        match Normal::new(mean, sd) {
            Ok(dist) => dist.sample(&mut self.dist),
            Err(_) => mean,
        }
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SimRng")
    }
}
