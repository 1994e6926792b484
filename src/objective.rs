//! The objective boundary between solvers and the problem domain.

use crate::error::Result;

/// A pure scalar function of a binary vector. Lower is better.
///
/// Implementations must be deterministic for a fixed input. The solvers do
/// not check that the vector length matches what the objective expects; an
/// objective bound to a dataset reports the mismatch itself and the solver
/// propagates the error.
///
/// `Send + Sync` because population evaluation may fan out over threads.
///
/// Plain closures `Fn(&[bool]) -> f64` are objectives:
///
/// ```
/// use fair_subset::objective::Objective;
///
/// let ones = |x: &[bool]| x.iter().filter(|&&b| b).count() as f64;
/// assert_eq!(ones.evaluate(&[true, false, true]).unwrap(), 2.0);
/// ```
pub trait Objective: Send + Sync {
    /// Scores a binary vector.
    fn evaluate(&self, bits: &[bool]) -> Result<f64>;
}

impl<F> Objective for F
where
    F: Fn(&[bool]) -> f64 + Send + Sync,
{
    fn evaluate(&self, bits: &[bool]) -> Result<f64> {
        Ok(self(bits))
    }
}

/// A binary vector together with its objective value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub bits: Vec<bool>,
    pub fitness: f64,
}

impl Solution {
    /// Indices of the ones, i.e. the selected rows.
    pub fn selected(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }
}
