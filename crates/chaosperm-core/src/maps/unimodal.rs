//! One-dimensional interval maps: logistic, tent, ICMIC, logistic–tent.
//!
//! All four evolve `x` only and carry `y` through unchanged, so a seed's
//! `y0` has no influence on the permutation they produce.

use crate::error::Result;
use crate::map::{Dimension, MapInfo, MapOracle, TrajectoryState};

/// Apply a scalar update `iterations` times to `state.x`.
fn iterate_x(state: TrajectoryState, iterations: usize, step: impl Fn(f64) -> f64) -> TrajectoryState {
    let mut x = state.x;
    for _ in 0..iterations {
        x = step(x);
    }
    TrajectoryState { x, y: state.y }
}

// ---------------------------------------------------------------------------
// LogisticMap
// ---------------------------------------------------------------------------

static LOGISTIC_INFO: MapInfo = MapInfo {
    name: "logistic",
    description: "Logistic map, chaotic for r in roughly (3.57, 4]",
    formula: "x <- r * x * (1 - x)",
    param_names: &["r"],
    default_params: &[3.8],
    dimension: Dimension::One,
};

/// Logistic map `x <- r x (1 - x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticMap {
    pub r: f64,
}

impl Default for LogisticMap {
    fn default() -> Self {
        Self { r: 3.8 }
    }
}

impl MapOracle for LogisticMap {
    fn info(&self) -> &MapInfo {
        &LOGISTIC_INFO
    }

    fn params(&self) -> Vec<f64> {
        vec![self.r]
    }

    fn advance(&self, state: TrajectoryState, iterations: usize) -> Result<TrajectoryState> {
        let r = self.r;
        Ok(iterate_x(state, iterations, |x| r * x * (1.0 - x)))
    }
}

// ---------------------------------------------------------------------------
// TentMap
// ---------------------------------------------------------------------------

static TENT_INFO: MapInfo = MapInfo {
    name: "tent",
    description: "Piecewise-linear tent map, chaotic for r in (1, 2]",
    formula: "x <- r * x if x < 0.5 else r * (1 - x)",
    param_names: &["r"],
    default_params: &[1.9],
    dimension: Dimension::One,
};

/// Tent map with slope `r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TentMap {
    pub r: f64,
}

impl Default for TentMap {
    fn default() -> Self {
        Self { r: 1.9 }
    }
}

impl MapOracle for TentMap {
    fn info(&self) -> &MapInfo {
        &TENT_INFO
    }

    fn params(&self) -> Vec<f64> {
        vec![self.r]
    }

    fn advance(&self, state: TrajectoryState, iterations: usize) -> Result<TrajectoryState> {
        let r = self.r;
        Ok(iterate_x(state, iterations, |x| {
            if x < 0.5 { r * x } else { r * (1.0 - x) }
        }))
    }
}

// ---------------------------------------------------------------------------
// IcmicMap
// ---------------------------------------------------------------------------

static ICMIC_INFO: MapInfo = MapInfo {
    name: "icmic",
    description: "Iterative chaotic map with infinite collapses, output in [-1, 1]",
    formula: "x <- sin(r * x)",
    param_names: &["r"],
    default_params: &[std::f64::consts::PI],
    dimension: Dimension::One,
};

/// ICMIC map `x <- sin(r x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcmicMap {
    pub r: f64,
}

impl Default for IcmicMap {
    fn default() -> Self {
        Self {
            r: std::f64::consts::PI,
        }
    }
}

impl MapOracle for IcmicMap {
    fn info(&self) -> &MapInfo {
        &ICMIC_INFO
    }

    fn params(&self) -> Vec<f64> {
        vec![self.r]
    }

    fn advance(&self, state: TrajectoryState, iterations: usize) -> Result<TrajectoryState> {
        let r = self.r;
        Ok(iterate_x(state, iterations, |x| (r * x).sin()))
    }
}

// ---------------------------------------------------------------------------
// LogisticTentMap
// ---------------------------------------------------------------------------

static LOGISTIC_TENT_INFO: MapInfo = MapInfo {
    name: "logistic_tent",
    description: "Logistic and tent maps blended and folded back into [0, 1)",
    formula: "x <- (r*x*(1-x) + (4-r)*x/2) mod 1 if x < 0.5 else (r*x*(1-x) + (4-r)*(1-x)/2) mod 1",
    param_names: &["r"],
    default_params: &[3.9],
    dimension: Dimension::One,
};

/// Logistic–tent system with mixing parameter `r` in `(0, 4]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticTentMap {
    pub r: f64,
}

impl Default for LogisticTentMap {
    fn default() -> Self {
        Self { r: 3.9 }
    }
}

impl MapOracle for LogisticTentMap {
    fn info(&self) -> &MapInfo {
        &LOGISTIC_TENT_INFO
    }

    fn params(&self) -> Vec<f64> {
        vec![self.r]
    }

    fn advance(&self, state: TrajectoryState, iterations: usize) -> Result<TrajectoryState> {
        let r = self.r;
        Ok(iterate_x(state, iterations, |x| {
            let logistic = r * x * (1.0 - x);
            let tent = if x < 0.5 {
                (4.0 - r) * x / 2.0
            } else {
                (4.0 - r) * (1.0 - x) / 2.0
            };
            (logistic + tent).rem_euclid(1.0)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(map: &dyn MapOracle, x: f64) -> f64 {
        map.advance(TrajectoryState::new(x, 0.7), 1).unwrap().x
    }

    #[test]
    fn test_logistic_single_step() {
        let map = LogisticMap { r: 4.0 };
        assert!((step(&map, 0.25) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_tent_branches() {
        let map = TentMap { r: 2.0 };
        assert!((step(&map, 0.2) - 0.4).abs() < 1e-15);
        assert!((step(&map, 0.8) - 0.4).abs() < 1e-15);
    }

    #[test]
    fn test_icmic_range() {
        let map = IcmicMap::default();
        let mut state = TrajectoryState::new(0.3, 0.0);
        for _ in 0..1000 {
            state = map.advance(state, 1).unwrap();
            assert!((-1.0..=1.0).contains(&state.x));
        }
    }

    #[test]
    fn test_logistic_tent_stays_in_unit_interval() {
        let map = LogisticTentMap::default();
        let mut state = TrajectoryState::new(0.123, 0.0);
        for _ in 0..1000 {
            state = map.advance(state, 1).unwrap();
            assert!((0.0..1.0).contains(&state.x), "x escaped: {}", state.x);
        }
    }

    #[test]
    fn test_y_carried_through() {
        let maps: Vec<Box<dyn MapOracle>> = vec![
            Box::new(LogisticMap::default()),
            Box::new(TentMap::default()),
            Box::new(IcmicMap::default()),
            Box::new(LogisticTentMap::default()),
        ];
        for map in maps {
            let out = map.advance(TrajectoryState::new(0.4, 0.9), 50).unwrap();
            assert_eq!(out.y, 0.9, "{} touched y", map.name());
        }
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let start = TrajectoryState::new(0.41, 0.17);
        assert_eq!(LogisticMap::default().advance(start, 0).unwrap(), start);
        assert_eq!(TentMap::default().advance(start, 0).unwrap(), start);
    }

    #[test]
    fn test_advance_composes() {
        let map = LogisticMap::default();
        let start = TrajectoryState::new(0.41, 0.0);
        let direct = map.advance(start, 30).unwrap();
        let split = map.advance(map.advance(start, 12).unwrap(), 18).unwrap();
        assert_eq!(direct, split);
    }
}
