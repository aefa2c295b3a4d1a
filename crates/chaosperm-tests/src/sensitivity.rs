//! Seed sensitivity (avalanche) test.
//!
//! Regenerate with both seed coordinates shifted by `delta` and count the
//! positions where the two permutations still agree. A chaotic generator
//! should agree on about `1/N` of positions, the same as two unrelated
//! random permutations.

use chaosperm_core::{Error, Permutation, PermutationGenerator, Result, Seed};
use serde::Serialize;
use statrs::distribution::{DiscreteCDF, Poisson};

use crate::TestResult;

/// Fraction of positions where `permutation` and the permutation for
/// `seed.perturbed(delta)` agree. In `[0, 1]`; `delta = 0` gives `1.0` when
/// `permutation` came from `seed`.
pub fn sensitivity_test(
    generator: &PermutationGenerator,
    permutation: &Permutation,
    seed: Seed,
    m: usize,
    n: usize,
    delta: f64,
) -> Result<f64> {
    if n < 1 {
        return Err(Error::InvalidSize { n });
    }
    if permutation.len() != n {
        return Err(Error::LengthMismatch {
            index: 0,
            expected: n,
            actual: permutation.len(),
        });
    }
    if !delta.is_finite() {
        return Err(Error::invalid_parameter(
            "delta",
            format!("must be finite, got {delta}"),
        ));
    }
    let modified = generator.generate(seed.perturbed(delta), m, n)?;
    Ok(permutation.agreement(&modified) as f64 / n as f64)
}

/// Aggregate of similarity scores over many seeds.
#[derive(Debug, Clone, Serialize)]
pub struct SensitivitySummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Mean similarity of two independent uniform permutations, `1/N`.
    pub random_baseline: f64,
    /// Agreeing positions summed over every seed.
    pub total_agreements: u64,
    /// Chance of at least this many agreements if the perturbed permutations
    /// were independent of the originals.
    pub p_value: f64,
}

/// `P(X >= observed)` for `X ~ Poisson(trials)`.
///
/// The number of fixed points shared by two independent uniform permutations
/// is approximately Poisson(1), so over `trials` seeds the total is
/// approximately Poisson(`trials`).
pub fn agreement_p_value(observed: u64, trials: usize) -> f64 {
    if observed == 0 || trials == 0 {
        return 1.0;
    }
    match Poisson::new(trials as f64) {
        Ok(dist) => dist.sf(observed - 1),
        Err(_) => 1.0,
    }
}

impl SensitivitySummary {
    pub fn from_similarities(similarities: &[f64], n: usize) -> Self {
        let count = similarities.len();
        let (mean, min, max) = if count == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                similarities.iter().sum::<f64>() / count as f64,
                similarities.iter().copied().fold(f64::INFINITY, f64::min),
                similarities.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };
        let total_agreements = similarities
            .iter()
            .map(|&sim| (sim * n as f64).round() as u64)
            .sum();
        Self {
            count,
            mean,
            min,
            max,
            random_baseline: if n == 0 { 0.0 } else { 1.0 / n as f64 },
            total_agreements,
            p_value: agreement_p_value(total_agreements, count),
        }
    }

    pub fn as_test_result(&self) -> TestResult {
        TestResult {
            name: "Seed Sensitivity".to_string(),
            passed: TestResult::pass_from_p(Some(self.p_value), 0.01),
            p_value: Some(self.p_value),
            statistic: self.mean,
            details: format!(
                "mean similarity={:.5} (random={:.5}), agreements={} over {} seeds",
                self.mean, self.random_baseline, self.total_agreements, self.count
            ),
            grade: TestResult::grade_from_p(Some(self.p_value)),
        }
    }
}
