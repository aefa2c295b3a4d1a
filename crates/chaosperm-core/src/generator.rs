//! Chaotic trajectory → permutation generator.
//!
//! Pipeline per seed:
//! 1. Warm up: advance the seed `m` steps and discard them
//! 2. Sample: advance one step at a time, `n` times, recording `x`
//! 3. Rank transform the `n` samples into a permutation
//!
//! Batches run one seed per task on scoped threads. Tasks share only the
//! read-only map; results come back in seed order after every worker joins.

use std::num::NonZeroUsize;

use crate::error::{Error, Result};
use crate::map::{MapOracle, TrajectoryState};
use crate::permutation::{Permutation, Seed, rank_transform};

/// Drives a [`MapOracle`] to produce permutations.
pub struct PermutationGenerator {
    map: Box<dyn MapOracle>,
}

impl PermutationGenerator {
    pub fn new(map: Box<dyn MapOracle>) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &dyn MapOracle {
        self.map.as_ref()
    }

    /// Warm up for `m` steps, then record `x` after each of `n` single steps.
    pub fn sample_trajectory(&self, seed: Seed, m: usize, n: usize) -> Result<Vec<f64>> {
        if n < 1 {
            return Err(Error::InvalidSize { n });
        }
        let mut state = self
            .map
            .advance(TrajectoryState::new(seed.x0, seed.y0), m)?;
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            state = self.map.advance(state, 1)?;
            values.push(state.x);
        }
        Ok(values)
    }

    /// Permutation of size `n` for `seed` after `m` warm-up steps.
    pub fn generate(&self, seed: Seed, m: usize, n: usize) -> Result<Permutation> {
        let values = self.sample_trajectory(seed, m, n)?;
        if values.iter().any(|v| !v.is_finite()) {
            log::warn!(
                "{}: non-finite samples for seed {seed}; permutation is degenerate",
                self.map.name()
            );
        }
        Ok(rank_transform(&values))
    }

    /// One permutation per seed, generated in parallel. Output order matches
    /// `seeds`. The first error (in seed order) is returned if any fail.
    pub fn generate_batch(&self, seeds: &[Seed], m: usize, n: usize) -> Result<Vec<Permutation>> {
        if n < 1 {
            return Err(Error::InvalidSize { n });
        }
        log::info!(
            "{}: generating {} permutation(s), n={n}, warmup={m}",
            self.map.name(),
            seeds.len()
        );
        self.map_parallel(seeds, |seed| self.generate(seed, m, n))
            .into_iter()
            .collect()
    }

    /// Apply `f` to every seed across worker threads, preserving order.
    pub fn map_parallel<T, F>(&self, seeds: &[Seed], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(Seed) -> T + Sync,
    {
        if seeds.is_empty() {
            return Vec::new();
        }
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(seeds.len());
        let chunk_len = seeds.len().div_ceil(workers);
        let f = &f;

        std::thread::scope(|s| {
            let handles: Vec<_> = seeds
                .chunks(chunk_len)
                .map(|chunk| s.spawn(move || chunk.iter().map(|&seed| f(seed)).collect::<Vec<T>>()))
                .collect();

            let mut out = Vec::with_capacity(seeds.len());
            for handle in handles {
                match handle.join() {
                    Ok(part) => out.extend(part),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            out
        })
    }
}
