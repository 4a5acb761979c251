//! Bounded-random primitives every generated metric is built from.
//!
//! Generators never touch an ambient RNG; they take a `RandomSource` so a
//! session can be replayed from a seed and tests can pin values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SampleError;

pub trait RandomSource: Send + Sync {
    /// Integer in `[min, max]`, inclusive on both ends.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;

    /// Float in `[min, max]`, rounded to `decimals` places.
    fn uniform_float(&mut self, min: f64, max: f64, decimals: u32) -> f64;
}

/// `k` distinct elements of `pool` via a partial Fisher–Yates shuffle.
pub fn sample_without_replacement<R, T>(
    rng: &mut R,
    pool: &[T],
    k: usize,
) -> Result<Vec<T>, SampleError>
where
    R: RandomSource + ?Sized,
    T: Clone,
{
    if k > pool.len() {
        return Err(SampleError::InvalidSampleSize {
            requested: k,
            available: pool.len(),
        });
    }

    let mut indices: Vec<usize> = (0..pool.len()).collect();
    let last = pool.len() as i64 - 1;
    for i in 0..k {
        let j = rng.uniform_int(i as i64, last) as usize;
        indices.swap(i, j);
    }

    Ok(indices[..k].iter().map(|&i| pool[i].clone()).collect())
}

/// Uniform pick of one element. `options` must be non-empty.
pub fn choose<'a, R, T>(rng: &mut R, options: &'a [T]) -> &'a T
where
    R: RandomSource + ?Sized,
{
    let idx = rng.uniform_int(0, options.len() as i64 - 1) as usize;
    &options[idx.min(options.len() - 1)]
}

/// Round to `decimals` places. Never returns negative zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor + 0.0
}

/// `StdRng`-backed source, seeded for replay or drawn from OS entropy.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is configured, entropy otherwise.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn uniform_float(&mut self, min: f64, max: f64, decimals: u32) -> f64 {
        if min >= max {
            return round_to(min, decimals);
        }
        let raw = self.rng.random_range(min..=max);
        round_to(raw, decimals).clamp(min, max)
    }
}
