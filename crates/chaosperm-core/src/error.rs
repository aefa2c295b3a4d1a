//! Error type shared by every chaosperm crate.

use thiserror::Error;

/// Errors raised by permutation generation and evaluation.
///
/// All variants describe a caller input violation or an oracle that was asked
/// to report divergence. None of them are transient; retrying with the same
/// input yields the same error.
#[derive(Error, Debug)]
pub enum Error {
    /// Permutation size must be at least 1.
    #[error("invalid permutation size: n={n} (need n >= 1)")]
    InvalidSize { n: usize },

    /// A batch evaluation was given no permutations.
    #[error("empty batch: at least one permutation is required")]
    EmptyBatch,

    /// An input did not have the length the operation expected.
    #[error("length mismatch at item {index}: expected {expected}, got {actual}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A vector handed to `Permutation::try_from_vec` is not a bijection.
    #[error("not a permutation: {detail}")]
    NotAPermutation { detail: String },

    /// A map or evaluation parameter is out of range or has the wrong arity.
    #[error("invalid parameter '{name}': {detail}")]
    InvalidParameter { name: String, detail: String },

    /// No map oracle is registered under this name.
    #[error("unknown map '{0}' (try: logistic, tent, icmic, logistic_tent, henon)")]
    UnknownMap(String),

    /// The trajectory left the containment bound and the oracle was configured
    /// to report instead of reseeding.
    #[error("trajectory diverged at iteration {iteration}: x={x}, y={y}")]
    Diverged { iteration: usize, x: f64, y: f64 },

    /// Configuration file could not be read.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

/// Result alias used throughout chaosperm.
pub type Result<T> = std::result::Result<T, Error>;
