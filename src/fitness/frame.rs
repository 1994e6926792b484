//! A minimal column-oriented table of named numeric columns.
//!
//! Only what the fitness adapters and the wrapper need: column lookup,
//! dropping columns, row masking, and row-wise concatenation.

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Named `f64` columns of equal length.
///
/// Categorical values (labels, protected groups) are expected to be encoded
/// numerically by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataFrame {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    rows: usize,
}

impl DataFrame {
    /// Builds a table from `(name, values)` pairs.
    ///
    /// ```
    /// use fair_subset::fitness::DataFrame;
    ///
    /// let df = DataFrame::new(vec![
    ///     ("age", vec![31.0, 45.0]),
    ///     ("label", vec![1.0, 0.0]),
    /// ])
    /// .unwrap();
    /// assert_eq!(df.n_rows(), 2);
    /// ```
    pub fn new<S, I>(columns: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let mut df = DataFrame::default();
        let mut seen = HashSet::new();
        for (name, values) in columns {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateColumn(name));
            }
            if let Some(first) = df.columns.first() {
                if first.len() != values.len() {
                    return Err(Error::RaggedColumns {
                        column: name,
                        expected: first.len(),
                        actual: values.len(),
                    });
                }
            }
            df.rows = values.len();
            df.names.push(name);
            df.columns.push(values);
        }
        Ok(df)
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Values of one column.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        Ok(&self.columns[self.position(name)?])
    }

    /// Values of one row, in column order.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[i]).collect()
    }

    /// A copy without the named columns.
    pub fn drop_columns(&self, drop: &[&str]) -> Result<DataFrame> {
        for name in drop {
            self.position(name)?;
        }
        let (names, columns) = self
            .names
            .iter()
            .zip(&self.columns)
            .filter(|(n, _)| !drop.contains(&n.as_str()))
            .map(|(n, c)| (n.clone(), c.clone()))
            .unzip();
        Ok(DataFrame {
            names,
            columns,
            rows: self.rows,
        })
    }

    /// Rows where `mask` is `true`, in order.
    ///
    /// Returns [`Error::DimensionMismatch`] unless `mask.len() == n_rows()`.
    pub fn filter(&self, mask: &[bool]) -> Result<DataFrame> {
        if mask.len() != self.n_rows() {
            return Err(Error::DimensionMismatch {
                expected: self.n_rows(),
                actual: mask.len(),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| mask_values(c, mask))
            .collect();
        Ok(DataFrame {
            names: self.names.clone(),
            columns,
            rows: mask.iter().filter(|&&keep| keep).count(),
        })
    }

    /// Rows of `self` followed by rows of `other`.
    ///
    /// Both tables must have the same columns in the same order.
    pub fn concat(&self, other: &DataFrame) -> Result<DataFrame> {
        if self.names != other.names {
            return Err(Error::ColumnMismatch {
                expected: self.names.clone(),
                actual: other.names.clone(),
            });
        }
        let columns = self
            .columns
            .iter()
            .zip(&other.columns)
            .map(|(a, b)| a.iter().chain(b).copied().collect())
            .collect();
        Ok(DataFrame {
            names: self.names.clone(),
            columns,
            rows: self.rows + other.rows,
        })
    }
}

/// Values where `mask` is `true`. Lengths must already agree.
pub(crate) fn mask_values(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}
