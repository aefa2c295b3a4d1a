//! # chaosperm-core
//!
//! **Turn a chaotic trajectory into a permutation.**
//!
//! `chaosperm-core` drives a chaotic map from a seed `(x0, y0)`, discards a
//! warm-up prefix, samples `N` values, and ranks them into a permutation of
//! `{0, …, N-1}`. Permutation families built this way underlie many
//! lightweight image and data scrambling schemes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chaosperm_core::{Divergence, PermutationGenerator, Seed, map_by_name};
//!
//! let map = map_by_name("logistic", None, Divergence::Reseed).unwrap();
//! let generator = PermutationGenerator::new(map);
//!
//! let perm = generator.generate(Seed::new(0.31, 0.62), 1000, 100).unwrap();
//! assert_eq!(perm.len(), 100);
//! ```
//!
//! ## Architecture
//!
//! Map oracle → Generator (warm-up, sample, rank) → Permutation
//!
//! Every map implements the [`MapOracle`] trait. Five are built in:
//! - **logistic**, **tent**, **icmic**, **logistic_tent**: one-dimensional,
//!   `y` is carried through untouched.
//! - **henon**: two-dimensional, with a [`Divergence`] policy for seeds that
//!   escape the attractor's basin.
//!
//! Evaluation (cycles, uniformity, sensitivity) lives in `chaosperm-tests`.

pub mod config;
pub mod error;
pub mod generator;
pub mod map;
pub mod maps;
pub mod permutation;

pub use config::{
    CombineMethod, DEFAULT_DELTA, EvaluationConfig, EvaluationProfile, random_seeds,
};
pub use error::{Error, Result};
pub use generator::PermutationGenerator;
pub use map::{Dimension, MapInfo, MapOracle, TrajectoryState};
pub use maps::{
    DIVERGENCE_BOUND, Divergence, HenonMap, IcmicMap, LogisticMap, LogisticTentMap, MAP_NAMES,
    TentMap, all_maps, map_by_name,
};
pub use permutation::{Permutation, Seed, argsort, rank_transform};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
