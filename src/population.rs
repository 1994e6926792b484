//! Binary vectors and populations of them.
//!
//! A binary vector is a `[bool]` slice of fixed length `d`; a [`Population`]
//! is an ordered batch of `n` such vectors stored row-major in one buffer.

use crate::error::{Error, Result};
use rand::Rng;

/// Number of ones in a binary vector.
pub fn count_ones(bits: &[bool]) -> usize {
    bits.iter().filter(|&&b| b).count()
}

/// An `n × d` batch of binary vectors.
///
/// Duplicate rows are allowed. All rows share the same length `dims`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    dims: usize,
    bits: Vec<bool>,
}

impl Population {
    /// Creates an all-zero population of `n` rows of length `dims`.
    pub fn zeros(n: usize, dims: usize) -> Self {
        Self {
            dims,
            bits: vec![false; n * dims],
        }
    }

    /// Creates a population of uniformly random rows.
    pub fn random<R: Rng>(n: usize, dims: usize, rng: &mut R) -> Self {
        let bits = (0..n * dims).map(|_| rng.random_bool(0.5)).collect();
        Self { dims, bits }
    }

    /// Builds a population from row vectors.
    ///
    /// Returns [`Error::InvalidPopulation`] if the rows differ in length.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<bool>>,
    {
        let mut rows = rows.into_iter().peekable();
        let dims = rows.peek().map_or(0, Vec::len);
        let mut bits = Vec::new();
        for (i, row) in rows.enumerate() {
            if row.len() != dims {
                return Err(Error::InvalidPopulation(format!(
                    "row {i} has length {}, expected {dims}",
                    row.len()
                )));
            }
            bits.extend(row);
        }
        Ok(Self { dims, bits })
    }

    /// Vector dimension `d`.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of rows `n`.
    pub fn len(&self) -> usize {
        if self.dims == 0 {
            0
        } else {
            self.bits.len() / self.dims
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, i: usize) -> &[bool] {
        &self.bits[i * self.dims..(i + 1) * self.dims]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [bool] {
        &mut self.bits[i * self.dims..(i + 1) * self.dims]
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.bits.chunks_exact(self.dims.max(1))
    }

    /// Iterates mutably over rows in order.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [bool]> {
        self.bits.chunks_exact_mut(self.dims.max(1))
    }

    /// Appends one row.
    ///
    /// # Panics
    /// Panics if `row.len() != self.dims()`.
    pub fn push(&mut self, row: &[bool]) {
        assert_eq!(row.len(), self.dims, "row length must equal dims");
        self.bits.extend_from_slice(row);
    }

    /// Appends all rows of `other` after the rows of `self`.
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn extend(&mut self, other: &Population) {
        assert_eq!(self.dims, other.dims, "populations must share dims");
        self.bits.extend_from_slice(&other.bits);
    }

    /// New population holding the given rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Population {
        let mut out = Population::zeros(0, self.dims);
        for &i in indices {
            out.push(self.row(i));
        }
        out
    }

    /// Flat row-major view of all bits.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}
