//! Cycle decomposition and multiplicative order.
//!
//! The order of a permutation is the LCM of its cycle lengths and grows like
//! `exp(sqrt(N ln N))` in the worst case, which overflows `u64` well before
//! N = 1000. [`Order`] keeps the LCM as a prime factorization so it is exact
//! for every N; conversions to `u128` and `f64` are lossy views.

use std::collections::BTreeMap;

use chaosperm_core::Permutation;
use serde::Serialize;
use serde::ser::SerializeStruct;

/// Multiplicative order of a permutation, stored as `{prime: exponent}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    factors: BTreeMap<u64, u32>,
}

/// Prime factorization by trial division. Cycle lengths are at most N.
fn factorize(mut n: u64) -> Vec<(u64, u32)> {
    let mut out = Vec::new();
    let mut p = 2;
    while p * p <= n {
        let mut e = 0;
        while n % p == 0 {
            n /= p;
            e += 1;
        }
        if e > 0 {
            out.push((p, e));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        out.push((n, 1));
    }
    out
}

impl Order {
    /// Order of the identity.
    pub fn one() -> Self {
        Self::default()
    }

    /// LCM of `lengths`. Zeros are ignored.
    pub fn lcm_of(lengths: impl IntoIterator<Item = usize>) -> Self {
        let mut factors = BTreeMap::new();
        for len in lengths {
            for (p, e) in factorize(len as u64) {
                let slot = factors.entry(p).or_insert(0);
                *slot = (*slot).max(e);
            }
        }
        Self { factors }
    }

    pub fn factors(&self) -> &BTreeMap<u64, u32> {
        &self.factors
    }

    /// Exact value, or `None` if it does not fit in a `u128`.
    pub fn to_u128(&self) -> Option<u128> {
        self.factors.iter().try_fold(1u128, |acc, (&p, &e)| {
            (p as u128).checked_pow(e).and_then(|pe| acc.checked_mul(pe))
        })
    }

    /// Nearest `f64`; `inf` beyond `f64::MAX`.
    pub fn as_f64(&self) -> f64 {
        self.factors
            .iter()
            .map(|(&p, &e)| (p as f64).powi(e as i32))
            .product()
    }

    pub fn log10(&self) -> f64 {
        self.factors
            .iter()
            .map(|(&p, &e)| e as f64 * (p as f64).log10())
            .sum()
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_u128() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "~1e{:.2}", self.log10()),
        }
    }
}

impl Serialize for Order {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Order", 3)?;
        s.serialize_field("exact", &self.to_u128().map(|v| v.to_string()))?;
        s.serialize_field("log10", &self.log10())?;
        s.serialize_field("factors", &self.factors)?;
        s.end()
    }
}

/// Disjoint cycles of a permutation plus derived statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CycleStructure {
    /// Cycles in discovery order, each starting at its smallest index.
    pub cycles: Vec<Vec<usize>>,
    /// Cycle length → number of cycles of that length.
    pub length_counts: BTreeMap<usize, usize>,
    /// LCM of all cycle lengths.
    pub order: Order,
}

impl CycleStructure {
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Number of elements the cycles cover. Equals N.
    pub fn total_length(&self) -> usize {
        self.cycles.iter().map(Vec::len).sum()
    }

    /// Fixed points are cycles of length 1.
    pub fn fixed_points(&self) -> usize {
        self.length_counts.get(&1).copied().unwrap_or(0)
    }

    pub fn longest_cycle(&self) -> usize {
        self.length_counts.keys().next_back().copied().unwrap_or(0)
    }
}

/// Decompose `permutation` into disjoint cycles. O(N).
pub fn find_cycles(permutation: &Permutation) -> CycleStructure {
    let perm = permutation.as_slice();
    let n = perm.len();
    let mut visited = vec![false; n];
    let mut cycles = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut current = start;
        while !visited[current] {
            visited[current] = true;
            cycle.push(current);
            current = perm[current];
        }
        cycles.push(cycle);
    }

    let mut length_counts = BTreeMap::new();
    for cycle in &cycles {
        *length_counts.entry(cycle.len()).or_insert(0) += 1;
    }
    let order = Order::lcm_of(length_counts.keys().copied());

    CycleStructure {
        cycles,
        length_counts,
        order,
    }
}

/// Mean order across structures, as `f64`. Empty input gives 0.
pub fn average_order(structures: &[CycleStructure]) -> f64 {
    if structures.is_empty() {
        return 0.0;
    }
    structures.iter().map(|c| c.order.as_f64()).sum::<f64>() / structures.len() as f64
}

/// Mean of `log10(order)` across structures. Empty input gives 0.
pub fn average_log10_order(structures: &[CycleStructure]) -> f64 {
    if structures.is_empty() {
        return 0.0;
    }
    structures.iter().map(|c| c.order.log10()).sum::<f64>() / structures.len() as f64
}
