//! Cardinality penalties.
//!
//! A constraint `n` asks for exactly `n` ones in a binary vector. `n = 0`
//! means *unconstrained*, not "zero ones": both penalties are zero for it.
//! Penalties are added to the objective, so they are non-negative.

use crate::population::count_ones;

/// Absolute deviation from the target cardinality: `|sum(x) - n|`.
///
/// Returns `0.0` when `n == 0`.
pub fn penalty(x: &[bool], n: usize) -> f64 {
    absolute(count_ones(x), n)
}

/// Deviation relative to the target: `|sum(x) - n| / n`.
///
/// Returns `0.0` when `n == 0`, so the division never sees a zero.
pub fn penalty_normalized(x: &[bool], n: usize) -> f64 {
    normalized(count_ones(x), n)
}

fn absolute(ones: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    ones.abs_diff(n) as f64
}

fn normalized(ones: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    absolute(ones, n) / n as f64
}

/// Selects which penalty a constrained solver adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Penalty {
    /// [`penalty`]: unbounded, grows with `d`.
    Absolute,
    /// [`penalty_normalized`]: scale-invariant in `d`.
    #[default]
    Normalized,
}

impl Penalty {
    /// Evaluates the selected penalty on a binary vector.
    pub fn apply(self, x: &[bool], n: usize) -> f64 {
        self.apply_count(count_ones(x), n)
    }

    /// Evaluates the selected penalty given the number of ones directly.
    pub fn apply_count(self, ones: usize, n: usize) -> f64 {
        match self {
            Penalty::Absolute => absolute(ones, n),
            Penalty::Normalized => normalized(ones, n),
        }
    }
}
