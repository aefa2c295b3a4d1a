//! Evaluation configuration: defaults, profiles, JSON loading, seed drawing.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::PermutationGenerator;
use crate::maps::{Divergence, map_by_name};
use crate::permutation::Seed;

/// Default seed perturbation for the sensitivity test.
pub const DEFAULT_DELTA: f64 = 1e-5;

/// How per-position p-values are merged into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMethod {
    /// `-2 Σ ln p` against χ² with `2k` degrees of freedom.
    #[default]
    Fisher,
    /// `Σ Φ⁻¹(1 - p) / √k` against the standard normal.
    Stouffer,
}

impl std::fmt::Display for CombineMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fisher => write!(f, "fisher"),
            Self::Stouffer => write!(f, "stouffer"),
        }
    }
}

/// Seed-count presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationProfile {
    Quick,
    Standard,
    Deep,
}

impl EvaluationProfile {
    pub fn seed_count(self) -> usize {
        match self {
            Self::Quick => 200,
            Self::Standard => 2_000,
            Self::Deep => 10_000,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "quick" => Some(Self::Quick),
            "standard" => Some(Self::Standard),
            "deep" => Some(Self::Deep),
            _ => None,
        }
    }
}

/// Everything needed to run one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Registry name of the map.
    pub map: String,
    /// Positional parameter override; empty keeps the map's defaults.
    pub params: Vec<f64>,
    /// Warm-up steps discarded before sampling (M).
    pub warmup: usize,
    /// Permutation size (N).
    pub n: usize,
    /// Number of random seeds.
    pub seeds: usize,
    /// RNG seed for drawing seeds; `None` draws from the OS.
    pub rng_seed: Option<u64>,
    /// Seed perturbation for the sensitivity test.
    pub delta: f64,
    pub divergence: Divergence,
    pub combine: CombineMethod,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            map: "logistic".to_string(),
            params: Vec::new(),
            warmup: 1000,
            n: 100,
            seeds: 10_000,
            rng_seed: None,
            delta: DEFAULT_DELTA,
            divergence: Divergence::Reseed,
            combine: CombineMethod::Fisher,
        }
    }
}

impl EvaluationConfig {
    /// Load a (possibly partial) config from a JSON file. Missing fields take
    /// their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_profile(mut self, profile: EvaluationProfile) -> Self {
        self.seeds = profile.seed_count();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n < 1 {
            return Err(Error::InvalidSize { n: self.n });
        }
        if self.seeds < 1 {
            return Err(Error::invalid_parameter("seeds", "need at least one seed"));
        }
        if !self.delta.is_finite() {
            return Err(Error::invalid_parameter(
                "delta",
                format!("must be finite, got {}", self.delta),
            ));
        }
        Ok(())
    }

    /// Generator for the configured map, parameters, and divergence policy.
    pub fn build_generator(&self) -> Result<PermutationGenerator> {
        let map = map_by_name(&self.map, Some(&self.params), self.divergence)?;
        Ok(PermutationGenerator::new(map))
    }

    /// Seeds drawn according to `seeds` and `rng_seed`.
    pub fn draw_seeds(&self) -> Vec<Seed> {
        random_seeds(self.seeds, self.rng_seed)
    }
}

/// `count` seeds uniform in `[0, 1)²`. Reproducible when `rng_seed` is set.
pub fn random_seeds(count: usize, rng_seed: Option<u64>) -> Vec<Seed> {
    let mut rng = match rng_seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    (0..count)
        .map(|_| Seed::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = EvaluationConfig::default();
        assert_eq!(c.map, "logistic");
        assert_eq!(c.warmup, 1000);
        assert_eq!(c.n, 100);
        assert_eq!(c.seeds, 10_000);
        assert_eq!(c.delta, 1e-5);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_profiles() {
        assert_eq!(EvaluationProfile::parse("quick"), Some(EvaluationProfile::Quick));
        assert_eq!(EvaluationProfile::parse("nope"), None);
        let c = EvaluationConfig::default().with_profile(EvaluationProfile::Quick);
        assert_eq!(c.seeds, 200);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let c = EvaluationConfig {
            n: 0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(Error::InvalidSize { n: 0 })));
        let c = EvaluationConfig {
            delta: f64::INFINITY,
            ..Default::default()
        };
        assert!(c.validate().is_err());
        let c = EvaluationConfig {
            seeds: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"map": "henon", "params": [1.4, 0.3], "n": 32, "divergence": "report"}}"#
        )
        .unwrap();
        let c = EvaluationConfig::from_json_path(file.path()).unwrap();
        assert_eq!(c.map, "henon");
        assert_eq!(c.n, 32);
        assert_eq!(c.warmup, 1000);
        assert_eq!(c.divergence, Divergence::Report);
        assert_eq!(c.combine, CombineMethod::Fisher);
        assert_eq!(c.build_generator().unwrap().map().name(), "henon");
    }

    #[test]
    fn test_malformed_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            EvaluationConfig::from_json_path(file.path()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EvaluationConfig::from_json_path(Path::new("/nonexistent/chaosperm.json"));
        assert!(matches!(err, Err(Error::Io(_))));
    }

    #[test]
    fn test_random_seeds_reproducible() {
        let a = random_seeds(50, Some(7));
        let b = random_seeds(50, Some(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|s| (0.0..1.0).contains(&s.x0) && (0.0..1.0).contains(&s.y0)));
        assert_ne!(random_seeds(50, Some(8)), a);
    }
}
