//! Abstract chaotic map trait and trajectory state.
//!
//! Every chaotic map implements the [`MapOracle`] trait, which provides
//! metadata via [`MapInfo`] and a deterministic `advance` step. The
//! permutation generator only ever talks to this trait.

use serde::Serialize;

use crate::error::Result;

/// Dimensionality of a chaotic map's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    /// Only `x` evolves; `y` is carried through untouched.
    One,
    /// Both `x` and `y` evolve.
    Two,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "1d"),
            Self::Two => write!(f, "2d"),
        }
    }
}

/// Evolving `(x, y)` pair consumed and produced by a map oracle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryState {
    pub x: f64,
    pub y: f64,
}

impl TrajectoryState {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Metadata about a chaotic map.
#[derive(Debug, Clone, Serialize)]
pub struct MapInfo {
    /// Registry identifier (e.g. `"logistic"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// The update rule, written out.
    pub formula: &'static str,
    /// Names of the scalar parameters, in positional order.
    pub param_names: &'static [&'static str],
    /// Parameter values used when none are given.
    pub default_params: &'static [f64],
    pub dimension: Dimension,
}

/// Trait that every chaotic map must implement.
///
/// Implementations must be pure: the result depends only on `state`,
/// `iterations`, and the parameters fixed at construction. `iterations == 0`
/// returns `state` unchanged.
pub trait MapOracle: Send + Sync {
    /// Map metadata.
    fn info(&self) -> &MapInfo;

    /// Current parameter values, in the order of `info().param_names`.
    fn params(&self) -> Vec<f64>;

    /// Advance the trajectory by `iterations` steps.
    fn advance(&self, state: TrajectoryState, iterations: usize) -> Result<TrajectoryState>;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }
}
