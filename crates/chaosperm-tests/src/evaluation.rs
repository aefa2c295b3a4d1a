//! Whole-batch evaluation and order sweeps.
//!
//! Per seed (in parallel): generate, decompose into cycles, run the
//! sensitivity test. After every seed is done: positional uniformity over
//! the whole batch.

use std::collections::BTreeMap;

use chaosperm_core::{
    CombineMethod, Error, EvaluationConfig, Permutation, PermutationGenerator, Result, Seed,
};
use serde::Serialize;

use crate::cycles::{CycleStructure, Order, average_log10_order, average_order, find_cycles};
use crate::randomness::{UniformityReport, randomness_tests_with};
use crate::sensitivity::{SensitivitySummary, sensitivity_test};

/// Everything measured for one seed.
#[derive(Debug, Clone, Serialize)]
pub struct SeedRecord {
    pub seed: Seed,
    pub permutation: Permutation,
    pub length_counts: BTreeMap<usize, usize>,
    pub order: Order,
    pub similarity: f64,
}

/// Result of [`Evaluator::evaluate`].
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub map: String,
    pub params: Vec<f64>,
    pub warmup: usize,
    pub n: usize,
    pub delta: f64,
    pub records: Vec<SeedRecord>,
    pub average_order: f64,
    pub average_log10_order: f64,
    pub sensitivity: SensitivitySummary,
    pub uniformity: UniformityReport,
}

/// Runs all three evaluations for one generator.
pub struct Evaluator {
    generator: PermutationGenerator,
}

impl Evaluator {
    pub fn new(generator: PermutationGenerator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &PermutationGenerator {
        &self.generator
    }

    /// Evaluate `seeds` with the sizes, delta, and combiner from `config`.
    pub fn evaluate(&self, seeds: &[Seed], config: &EvaluationConfig) -> Result<EvaluationReport> {
        self.evaluate_with(seeds, config.warmup, config.n, config.delta, config.combine)
    }

    pub fn evaluate_with(
        &self,
        seeds: &[Seed],
        m: usize,
        n: usize,
        delta: f64,
        combine: CombineMethod,
    ) -> Result<EvaluationReport> {
        if seeds.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if n < 1 {
            return Err(Error::InvalidSize { n });
        }
        let map = self.generator.map();
        log::info!(
            "evaluating {} over {} seed(s): n={n}, warmup={m}, delta={delta}",
            map.name(),
            seeds.len()
        );

        let per_seed: Vec<Result<(SeedRecord, CycleStructure)>> =
            self.generator.map_parallel(seeds, |seed| {
                let permutation = self.generator.generate(seed, m, n)?;
                let cycles = find_cycles(&permutation);
                let similarity = sensitivity_test(&self.generator, &permutation, seed, m, n, delta)?;
                let record = SeedRecord {
                    seed,
                    permutation,
                    length_counts: cycles.length_counts.clone(),
                    order: cycles.order.clone(),
                    similarity,
                };
                Ok((record, cycles))
            });

        let mut records = Vec::with_capacity(seeds.len());
        let mut structures = Vec::with_capacity(seeds.len());
        for item in per_seed {
            let (record, cycles) = item?;
            records.push(record);
            structures.push(cycles);
        }

        let batch: Vec<Permutation> = records.iter().map(|r| r.permutation.clone()).collect();
        let uniformity = randomness_tests_with(&batch, combine)?;
        let similarities: Vec<f64> = records.iter().map(|r| r.similarity).collect();

        Ok(EvaluationReport {
            map: map.name().to_string(),
            params: map.params(),
            warmup: m,
            n,
            delta,
            average_order: average_order(&structures),
            average_log10_order: average_log10_order(&structures),
            sensitivity: SensitivitySummary::from_similarities(&similarities, n),
            uniformity,
            records,
        })
    }
}

/// Average order at one permutation size.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub n: usize,
    pub average_order: f64,
    pub average_log10_order: f64,
    pub orders: Vec<Order>,
}

/// Average order over `seeds` for each size in `n_values`.
pub fn order_sweep(
    generator: &PermutationGenerator,
    seeds: &[Seed],
    m: usize,
    n_values: &[usize],
) -> Result<Vec<SweepPoint>> {
    if seeds.is_empty() {
        return Err(Error::EmptyBatch);
    }
    n_values
        .iter()
        .map(|&n| {
            let batch = generator.generate_batch(seeds, m, n)?;
            let structures: Vec<CycleStructure> = batch.iter().map(find_cycles).collect();
            log::debug!("sweep: n={n} done");
            Ok(SweepPoint {
                n,
                average_order: average_order(&structures),
                average_log10_order: average_log10_order(&structures),
                orders: structures.into_iter().map(|c| c.order).collect(),
            })
        })
        .collect()
}
