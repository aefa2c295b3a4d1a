//! Statistical tests for chaos-based permutation families.
//!
//! Three independent views of a batch of permutations:
//! - [`cycles`]: cycle decomposition and multiplicative order
//! - [`randomness`]: per-position chi-square uniformity with p-value combining
//! - [`sensitivity`]: agreement between permutations from a seed and a
//!   minutely perturbed seed
//!
//! [`evaluation`] runs all three over a seed set. Tests that produce a p-value
//! also report a [`TestResult`] with a pass/fail determination and a letter
//! grade (A through F).

pub mod cycles;
pub mod evaluation;
pub mod randomness;
pub mod sensitivity;

pub use cycles::{CycleStructure, Order, average_log10_order, average_order, find_cycles};
pub use evaluation::{EvaluationReport, Evaluator, SeedRecord, SweepPoint, order_sweep};
pub use randomness::{
    PositionFrequencyTable, UniformityReport, chi_square_uniform, combine_p_values,
    randomness_tests, randomness_tests_with, uniformity_from_table,
};
pub use sensitivity::{SensitivitySummary, agreement_p_value, sensitivity_test};

use serde::Serialize;

/// Result of a single statistical test.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub p_value: Option<f64>,
    pub statistic: f64,
    pub details: String,
    pub grade: char,
}

impl TestResult {
    /// Assign a letter grade based on p-value.
    ///
    /// - A: p >= 0.1
    /// - B: p >= 0.01
    /// - C: p >= 0.001
    /// - D: p >= 0.0001
    /// - F: otherwise or None
    pub fn grade_from_p(p: Option<f64>) -> char {
        match p {
            Some(p) if p >= 0.1 => 'A',
            Some(p) if p >= 0.01 => 'B',
            Some(p) if p >= 0.001 => 'C',
            Some(p) if p >= 0.0001 => 'D',
            _ => 'F',
        }
    }

    /// Determine pass/fail from p-value against a threshold (default 0.01).
    pub fn pass_from_p(p: Option<f64>, threshold: f64) -> bool {
        match p {
            Some(p) => p >= threshold,
            None => false,
        }
    }
}

/// Every p-valued test from an evaluation, in display order.
pub fn run_all_tests(report: &EvaluationReport) -> Vec<TestResult> {
    vec![
        report.uniformity.as_test_result(),
        report.sensitivity.as_test_result(),
    ]
}

/// Calculate overall quality score (0-100) from test results.
///
/// Each grade maps to a score: A=100, B=75, C=50, D=25, F=0.
/// Returns the average across all tests.
pub fn calculate_quality_score(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results
        .iter()
        .map(|r| match r.grade {
            'A' => 100.0,
            'B' => 75.0,
            'C' => 50.0,
            'D' => 25.0,
            _ => 0.0,
        })
        .sum();
    total / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_from_p() {
        assert_eq!(TestResult::grade_from_p(Some(0.5)), 'A');
        assert_eq!(TestResult::grade_from_p(Some(0.05)), 'B');
        assert_eq!(TestResult::grade_from_p(Some(0.005)), 'C');
        assert_eq!(TestResult::grade_from_p(Some(0.0005)), 'D');
        assert_eq!(TestResult::grade_from_p(Some(0.00000001)), 'F');
        assert_eq!(TestResult::grade_from_p(None), 'F');
        assert_eq!(TestResult::grade_from_p(Some(f64::NAN)), 'F');
    }

    #[test]
    fn test_pass_from_p() {
        assert!(TestResult::pass_from_p(Some(0.05), 0.01));
        assert!(!TestResult::pass_from_p(Some(0.005), 0.01));
        assert!(!TestResult::pass_from_p(None, 0.01));
    }

    #[test]
    fn test_quality_score() {
        let results = vec![
            TestResult {
                name: "A".into(),
                passed: true,
                p_value: Some(0.5),
                statistic: 0.0,
                details: String::new(),
                grade: 'A',
            },
            TestResult {
                name: "F".into(),
                passed: false,
                p_value: Some(0.0),
                statistic: 0.0,
                details: String::new(),
                grade: 'F',
            },
        ];
        let score = calculate_quality_score(&results);
        assert!((score - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_calculate_quality_score_empty() {
        assert_eq!(calculate_quality_score(&[]), 0.0);
    }
}
