//! Seeds, permutations, and the rank transform that connects them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Initial condition `(x0, y0)` of one trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub x0: f64,
    pub y0: f64,
}

impl Seed {
    pub fn new(x0: f64, y0: f64) -> Self {
        Self { x0, y0 }
    }

    /// Both coordinates shifted by `delta`.
    pub fn perturbed(&self, delta: f64) -> Self {
        Self {
            x0: self.x0 + delta,
            y0: self.y0 + delta,
        }
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x0, self.y0)
    }
}

/// A bijection on `{0, …, N-1}`.
///
/// `perm[i]` is the output position of original index `i`. Every constructor
/// guarantees each value appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity on `n` elements.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Validate and wrap a vector.
    pub fn try_from_vec(values: Vec<usize>) -> Result<Self> {
        let n = values.len();
        let mut seen = vec![false; n];
        for (i, &v) in values.iter().enumerate() {
            if v >= n {
                return Err(Error::NotAPermutation {
                    detail: format!("value {v} at index {i} is out of range for n={n}"),
                });
            }
            if seen[v] {
                return Err(Error::NotAPermutation {
                    detail: format!("value {v} appears more than once"),
                });
            }
            seen[v] = true;
        }
        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Output position of original index `i`.
    pub fn get(&self, i: usize) -> Option<usize> {
        self.0.get(i).copied()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &v)| i == v)
    }

    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.0.len()];
        for (i, &v) in self.0.iter().enumerate() {
            inv[v] = i;
        }
        Self(inv)
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Permutation) -> Result<Self> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                index: 1,
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(Self(other.0.iter().map(|&j| self.0[j]).collect()))
    }

    /// Number of positions where `self` and `other` agree.
    ///
    /// Only the common prefix is compared when lengths differ.
    pub fn agreement(&self, other: &Permutation) -> usize {
        self.0.iter().zip(&other.0).filter(|(a, b)| a == b).count()
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = Error;

    fn try_from(values: Vec<usize>) -> Result<Self> {
        Self::try_from_vec(values)
    }
}

/// Total order on samples: numbers ascending, `-0.0 == 0.0`, NaN after
/// everything and equal to other NaN.
fn sample_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Indices that would sort `values` ascending. Stable: ties keep index order.
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| sample_cmp(values[a], values[b]));
    order
}

/// Zero-based rank of each value, as a permutation.
///
/// Computed as `argsort(argsort(values))`; inverting the sort order is the
/// second argsort. Equal values are ranked by original index, so a constant
/// trajectory yields the identity.
pub fn rank_transform(values: &[f64]) -> Permutation {
    let order = argsort(values);
    let mut ranks = vec![0usize; values.len()];
    for (rank, &index) in order.iter().enumerate() {
        ranks[index] = rank;
    }
    Permutation(ranks)
}
