//! Positional uniformity of a permutation family.
//!
//! For a good generator, original index `i` should land on every output
//! position equally often across a batch. Each row of the position-frequency
//! table gets a chi-square goodness-of-fit test against the uniform count
//! `B / N`, and the N row p-values are combined into one.

use chaosperm_core::{CombineMethod, Error, Permutation, Result};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::TestResult;

/// N×N counts: `get(i, j)` is how often original index `i` went to position `j`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionFrequencyTable {
    n: usize,
    batch_size: usize,
    counts: Vec<u64>,
}

impl PositionFrequencyTable {
    /// Tally a batch. All permutations must have the same, non-zero length.
    pub fn from_batch(permutations: &[Permutation]) -> Result<Self> {
        let first = permutations.first().ok_or(Error::EmptyBatch)?;
        let n = first.len();
        if n == 0 {
            return Err(Error::InvalidSize { n });
        }
        let mut counts = vec![0u64; n * n];
        for (index, perm) in permutations.iter().enumerate() {
            if perm.len() != n {
                return Err(Error::LengthMismatch {
                    index,
                    expected: n,
                    actual: perm.len(),
                });
            }
            for (i, &pos) in perm.as_slice().iter().enumerate() {
                counts[i * n + pos] += 1;
            }
        }
        Ok(Self {
            n,
            batch_size: permutations.len(),
            counts,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.counts[i * self.n + j]
    }

    /// Counts for original index `i` over every output position.
    pub fn row(&self, i: usize) -> &[u64] {
        &self.counts[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.counts.chunks(self.n)
    }

    pub fn row_sums(&self) -> Vec<u64> {
        self.rows().map(|r| r.iter().sum()).collect()
    }

    pub fn column_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.n];
        for row in self.rows() {
            for (s, &c) in sums.iter_mut().zip(row) {
                *s += c;
            }
        }
        sums
    }

    /// Expected count per cell under uniformity.
    pub fn expected_count(&self) -> f64 {
        self.batch_size as f64 / self.n as f64
    }
}

/// Upper tail of χ² with `df` degrees of freedom.
fn chi2_sf(statistic: f64, df: f64) -> f64 {
    if statistic.is_nan() {
        return f64::NAN;
    }
    if statistic == f64::INFINITY {
        return 0.0;
    }
    if statistic <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(df) {
        Ok(dist) => dist.sf(statistic),
        Err(_) => 1.0,
    }
}

/// Chi-square goodness of fit of `observed` against a flat `expected` count.
///
/// Returns `(statistic, p_value)` with `len - 1` degrees of freedom. A single
/// bin has nothing to compare and yields `(0.0, 1.0)`.
pub fn chi_square_uniform(observed: &[u64], expected: f64) -> (f64, f64) {
    if observed.len() < 2 || expected <= 0.0 {
        return (0.0, 1.0);
    }
    let statistic: f64 = observed
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let df = (observed.len() - 1) as f64;
    (statistic, chi2_sf(statistic, df))
}

/// Merge independent p-values into `(statistic, combined_p)`.
///
/// Inputs are sorted before summation, so the result does not depend on
/// their order. Smaller p-values always pull the combined value down.
pub fn combine_p_values(p_values: &[f64], method: CombineMethod) -> (f64, f64) {
    if p_values.is_empty() {
        return (0.0, 1.0);
    }
    let mut sorted = p_values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let k = sorted.len() as f64;

    match method {
        CombineMethod::Fisher => {
            let statistic: f64 = sorted.iter().map(|&p| -2.0 * p.ln()).sum();
            (statistic, chi2_sf(statistic, 2.0 * k))
        }
        CombineMethod::Stouffer => {
            let Ok(normal) = Normal::new(0.0, 1.0) else {
                return (f64::NAN, f64::NAN);
            };
            // Clamp so that p = 0 or p = 1 give large but finite scores.
            let z_sum: f64 = sorted
                .iter()
                .map(|&p| -normal.inverse_cdf(p.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)))
                .sum();
            let statistic = z_sum / k.sqrt();
            (statistic, normal.sf(statistic))
        }
    }
}

/// Outcome of the positional uniformity test on one batch.
#[derive(Debug, Clone, Serialize)]
pub struct UniformityReport {
    pub n: usize,
    pub batch_size: usize,
    /// One p-value per original index.
    pub p_values: Vec<f64>,
    /// One chi-square statistic per original index.
    pub statistics: Vec<f64>,
    pub method: CombineMethod,
    pub combined_statistic: f64,
    pub combined_p_value: f64,
    /// Row p-values below 0.01.
    pub rejected_rows: usize,
    pub passed: bool,
    pub grade: char,
}

impl UniformityReport {
    /// Summary in the shape of the byte-stream test battery.
    pub fn as_test_result(&self) -> TestResult {
        TestResult {
            name: format!("Positional Uniformity ({})", self.method),
            passed: self.passed,
            p_value: Some(self.combined_p_value),
            statistic: self.combined_statistic,
            details: format!(
                "N={}, batch={}, expected/cell={:.2}, rows rejected={}/{}",
                self.n,
                self.batch_size,
                self.batch_size as f64 / self.n as f64,
                self.rejected_rows,
                self.n
            ),
            grade: TestResult::grade_from_p(Some(self.combined_p_value)),
        }
    }
}

/// Per-row chi-square tests on a prepared table.
pub fn uniformity_from_table(table: &PositionFrequencyTable, method: CombineMethod) -> UniformityReport {
    let expected = table.expected_count();
    if expected < 5.0 {
        log::warn!(
            "uniformity: expected count per cell is {expected:.2} (< 5); chi-square approximation is weak"
        );
    }
    let (statistics, p_values): (Vec<f64>, Vec<f64>) = table
        .rows()
        .map(|row| chi_square_uniform(row, expected))
        .unzip();
    let (combined_statistic, combined_p_value) = combine_p_values(&p_values, method);
    let rejected_rows = p_values.iter().filter(|&&p| p < 0.01).count();

    UniformityReport {
        n: table.n(),
        batch_size: table.batch_size(),
        p_values,
        statistics,
        method,
        combined_statistic,
        combined_p_value,
        rejected_rows,
        passed: TestResult::pass_from_p(Some(combined_p_value), 0.01),
        grade: TestResult::grade_from_p(Some(combined_p_value)),
    }
}

/// Positional uniformity with Fisher's combiner.
pub fn randomness_tests(permutations: &[Permutation]) -> Result<UniformityReport> {
    randomness_tests_with(permutations, CombineMethod::Fisher)
}

/// Positional uniformity with the given combiner.
pub fn randomness_tests_with(
    permutations: &[Permutation],
    method: CombineMethod,
) -> Result<UniformityReport> {
    let table = PositionFrequencyTable::from_batch(permutations)?;
    log::info!(
        "uniformity: {} permutation(s) of size {}, combiner={method}",
        table.batch_size(),
        table.n()
    );
    Ok(uniformity_from_table(&table, method))
}
