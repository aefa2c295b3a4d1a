//! Hénon map with a divergence guard.
//!
//! The Hénon attractor is bounded, but seeds outside its basin escape to
//! infinity within a few dozen steps. Each step checks the state against
//! [`DIVERGENCE_BOUND`] and applies the configured [`Divergence`] policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::map::{Dimension, MapInfo, MapOracle, TrajectoryState};

/// Magnitude beyond which a state counts as diverged.
pub const DIVERGENCE_BOUND: f64 = 1e10;

/// What to do when the trajectory leaves the containment bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Divergence {
    /// Replace the state with a fresh point in `[0, 1)²` derived from the
    /// diverged state's bit pattern. Deterministic, so the map stays pure.
    #[default]
    Reseed,
    /// Stop and return [`Error::Diverged`].
    Report,
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reseed => write!(f, "reseed"),
            Self::Report => write!(f, "report"),
        }
    }
}

static HENON_INFO: MapInfo = MapInfo {
    name: "henon",
    description: "Two-dimensional Hénon map, classic attractor at a=1.4, b=0.3",
    formula: "(x, y) <- (1 - a * x^2 + y, b * x)",
    param_names: &["a", "b"],
    default_params: &[1.4, 0.3],
    dimension: Dimension::Two,
};

/// Hénon map `(x, y) <- (1 - a x² + y, b x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HenonMap {
    pub a: f64,
    pub b: f64,
    pub divergence: Divergence,
}

impl Default for HenonMap {
    fn default() -> Self {
        Self {
            a: 1.4,
            b: 0.3,
            divergence: Divergence::Reseed,
        }
    }
}

impl HenonMap {
    pub fn with_divergence(mut self, divergence: Divergence) -> Self {
        self.divergence = divergence;
        self
    }
}

fn escaped(state: TrajectoryState) -> bool {
    // Written so that NaN counts as escaped.
    !(state.x.abs() <= DIVERGENCE_BOUND && state.y.abs() <= DIVERGENCE_BOUND)
}

/// Fresh state drawn from an RNG keyed on the diverged state.
fn reseed(state: TrajectoryState) -> TrajectoryState {
    let key = state.x.to_bits() ^ state.y.to_bits().rotate_left(29);
    let mut rng = StdRng::seed_from_u64(key);
    TrajectoryState {
        x: rng.random::<f64>(),
        y: rng.random::<f64>(),
    }
}

impl MapOracle for HenonMap {
    fn info(&self) -> &MapInfo {
        &HENON_INFO
    }

    fn params(&self) -> Vec<f64> {
        vec![self.a, self.b]
    }

    fn advance(&self, state: TrajectoryState, iterations: usize) -> Result<TrajectoryState> {
        let mut s = state;
        for iteration in 0..iterations {
            s = TrajectoryState {
                x: 1.0 - self.a * s.x * s.x + s.y,
                y: self.b * s.x,
            };
            if escaped(s) {
                match self.divergence {
                    Divergence::Reseed => {
                        let fresh = reseed(s);
                        log::debug!(
                            "henon: reseeding diverged state ({}, {}) -> ({}, {})",
                            s.x,
                            s.y,
                            fresh.x,
                            fresh.y
                        );
                        s = fresh;
                    }
                    Divergence::Report => {
                        return Err(Error::Diverged {
                            iteration,
                            x: s.x,
                            y: s.y,
                        });
                    }
                }
            }
        }
        Ok(s)
    }
}
