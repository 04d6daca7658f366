//! Random number generation for dungeon layout
//!
//! Uses a seeded ChaCha RNG so the same seed always yields the same dungeon.
//! One `GenRng` is threaded through every pipeline stage; the order of draws
//! is part of the reproducibility contract.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator random number source
///
/// Wraps ChaCha8Rng for reproducible random number generation.
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GenRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 without consuming randomness if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform float in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Integer uniform in [lo, hi)
    ///
    /// This is the floor of a uniform float drawn from [lo, hi). Returns `lo`
    /// without consuming randomness when the range is empty.
    pub fn floor_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Standard normal sample (Marsaglia polar method)
    pub fn standard_normal(&mut self) -> f64 {
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s >= 1.0 || s == 0.0 {
                continue;
            }
            return u * (-2.0 * s.ln() / s).sqrt();
        }
    }

    /// Uniformly distributed point inside a disk centred on the origin
    ///
    /// The radial distance is `radius * sqrt(u)` so density is uniform per
    /// unit area rather than clustered at the centre.
    pub fn point_in_disk(&mut self, radius: f64) -> (f64, f64) {
        let theta = TAU * self.uniform();
        let distance = radius * self.uniform().sqrt();
        (distance * theta.cos(), distance * theta.sin())
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}
