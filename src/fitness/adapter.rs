//! Fitness adapters: a dataset, a discrimination measure, and an optional
//! penalty bound into an [`Objective`] over row masks.
//!
//! - [`RemoveObjective`] (`f_remove`): the mask selects which rows of the
//!   dataset to keep.
//! - [`AddObjective`] (`f_add`): the mask selects which rows of a separate
//!   sample table (e.g. synthetic candidates) to append to the dataset.
//!
//! Both split the scored table into features `x` (every column except the
//! label and the protected attributes), labels `y`, and protected attributes
//! `z`, then return `measure(x, y, z) + penalty(x, y, z)`.

use super::frame::{mask_values, DataFrame};
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::penalty::Penalty;
use std::fmt;
use std::sync::Arc;

/// Protected-attribute values of the scored rows.
///
/// One protected column stays one-dimensional; several are kept as a
/// two-dimensional row-major array. Measures dispatch on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtectedAttributes {
    /// One value per row.
    Single(Vec<f64>),
    /// One inner vector per row, one entry per protected column.
    Multiple(Vec<Vec<f64>>),
}

impl ProtectedAttributes {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ProtectedAttributes::Single(values) => values.len(),
            ProtectedAttributes::Multiple(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_frame(df: &DataFrame, columns: &[String]) -> Result<Self> {
        match columns {
            [single] => Ok(ProtectedAttributes::Single(df.column(single)?.to_vec())),
            _ => {
                let cols = columns
                    .iter()
                    .map(|c| df.column(c))
                    .collect::<Result<Vec<_>>>()?;
                let rows = (0..df.n_rows())
                    .map(|i| cols.iter().map(|c| c[i]).collect())
                    .collect();
                Ok(ProtectedAttributes::Multiple(rows))
            }
        }
    }

    fn filter(&self, mask: &[bool]) -> Self {
        match self {
            ProtectedAttributes::Single(values) => {
                ProtectedAttributes::Single(mask_values(values, mask))
            }
            ProtectedAttributes::Multiple(rows) => ProtectedAttributes::Multiple(
                rows.iter()
                    .zip(mask)
                    .filter_map(|(row, &keep)| keep.then(|| row.clone()))
                    .collect(),
            ),
        }
    }

    fn concat(&self, other: &Self) -> Self {
        match (self, other) {
            (ProtectedAttributes::Single(a), ProtectedAttributes::Single(b)) => {
                ProtectedAttributes::Single(a.iter().chain(b).copied().collect())
            }
            (ProtectedAttributes::Multiple(a), ProtectedAttributes::Multiple(b)) => {
                ProtectedAttributes::Multiple(a.iter().chain(b).cloned().collect())
            }
            // Both sides are built from the same column list.
            _ => unreachable!("protected attributes of different arity"),
        }
    }
}

/// A scalar discrimination measure; lower means less measured unfairness.
///
/// Closures `Fn(&DataFrame, &[f64], &ProtectedAttributes) -> f64` qualify.
pub trait DiscMeasure: Send + Sync {
    fn measure(&self, x: &DataFrame, y: &[f64], z: &ProtectedAttributes) -> f64;
}

impl<F> DiscMeasure for F
where
    F: Fn(&DataFrame, &[f64], &ProtectedAttributes) -> f64 + Send + Sync,
{
    fn measure(&self, x: &DataFrame, y: &[f64], z: &ProtectedAttributes) -> f64 {
        self(x, y, z)
    }
}

/// A penalty over the scored subset, added to the measure.
///
/// Extra parameters live in the implementing value, so closures capturing
/// them work directly.
pub trait SubsetPenalty: Send + Sync {
    fn penalty(&self, x: &DataFrame, y: &[f64], z: &ProtectedAttributes) -> f64;
}

impl<F> SubsetPenalty for F
where
    F: Fn(&DataFrame, &[f64], &ProtectedAttributes) -> f64 + Send + Sync,
{
    fn penalty(&self, x: &DataFrame, y: &[f64], z: &ProtectedAttributes) -> f64 {
        self(x, y, z)
    }
}

/// Penalizes the number of scored rows deviating from `target`.
///
/// Lifts [`Penalty`] to the subset boundary; `target = 0` disables it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardinalityPenalty {
    pub target: usize,
    pub kind: Penalty,
    /// Multiplier applied to the penalty.
    pub weight: f64,
}

impl CardinalityPenalty {
    pub fn new(target: usize, kind: Penalty) -> Self {
        Self {
            target,
            kind,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl SubsetPenalty for CardinalityPenalty {
    fn penalty(&self, _x: &DataFrame, y: &[f64], _z: &ProtectedAttributes) -> f64 {
        self.weight * self.kind.apply_count(y.len(), self.target)
    }
}

/// Which columns hold the label and the protected attribute(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairnessColumns {
    pub label: String,
    pub protected: Vec<String>,
}

impl FairnessColumns {
    /// ```
    /// use fair_subset::fitness::FairnessColumns;
    ///
    /// let cols = FairnessColumns::new("income", ["sex"]);
    /// assert_eq!(cols.protected, vec!["sex".to_string()]);
    /// ```
    pub fn new<L, P, S>(label: L, protected: P) -> Self
    where
        L: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            protected: protected.into_iter().map(Into::into).collect(),
        }
    }

    fn validate(&self, df: &DataFrame) -> Result<()> {
        if self.protected.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one protected attribute is required".into(),
            ));
        }
        df.column(&self.label)?;
        for name in &self.protected {
            df.column(name)?;
        }
        Ok(())
    }
}

/// A table split into features, labels, and protected attributes.
#[derive(Debug, Clone)]
struct Split {
    x: DataFrame,
    y: Vec<f64>,
    z: ProtectedAttributes,
}

impl Split {
    fn new(df: &DataFrame, columns: &FairnessColumns) -> Result<Self> {
        columns.validate(df)?;
        let mut dropped: Vec<&str> = columns.protected.iter().map(String::as_str).collect();
        dropped.push(&columns.label);
        Ok(Split {
            x: df.drop_columns(&dropped)?,
            y: df.column(&columns.label)?.to_vec(),
            z: ProtectedAttributes::from_frame(df, &columns.protected)?,
        })
    }

    fn len(&self) -> usize {
        self.y.len()
    }

    fn filter(&self, mask: &[bool]) -> Result<Self> {
        Ok(Split {
            x: self.x.filter(mask)?,
            y: mask_values(&self.y, mask),
            z: self.z.filter(mask),
        })
    }

    fn concat(&self, other: &Split) -> Result<Self> {
        Ok(Split {
            x: self.x.concat(&other.x)?,
            y: self.y.iter().chain(&other.y).copied().collect(),
            z: self.z.concat(&other.z),
        })
    }

    fn score(&self, measure: &dyn DiscMeasure, penalty: Option<&dyn SubsetPenalty>) -> f64 {
        let value = measure.measure(&self.x, &self.y, &self.z);
        match penalty {
            Some(p) => value + p.penalty(&self.x, &self.y, &self.z),
            None => value,
        }
    }
}

fn check_len(mask: &[bool], expected: usize) -> Result<()> {
    if mask.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: mask.len(),
        });
    }
    Ok(())
}

/// Scores the rows of a dataset selected by the mask.
#[derive(Clone)]
pub struct RemoveObjective {
    data: Split,
    measure: Arc<dyn DiscMeasure>,
    penalty: Option<Arc<dyn SubsetPenalty>>,
}

impl RemoveObjective {
    pub fn new(
        dataset: &DataFrame,
        columns: &FairnessColumns,
        measure: Arc<dyn DiscMeasure>,
        penalty: Option<Arc<dyn SubsetPenalty>>,
    ) -> Result<Self> {
        Ok(Self {
            data: Split::new(dataset, columns)?,
            measure,
            penalty,
        })
    }

    /// Mask length: the number of dataset rows.
    pub fn dims(&self) -> usize {
        self.data.len()
    }
}

impl Objective for RemoveObjective {
    fn evaluate(&self, bits: &[bool]) -> Result<f64> {
        check_len(bits, self.dims())?;
        let kept = self.data.filter(bits)?;
        Ok(kept.score(self.measure.as_ref(), self.penalty.as_deref()))
    }
}

impl fmt::Debug for RemoveObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveObjective")
            .field("rows", &self.dims())
            .field("penalized", &self.penalty.is_some())
            .finish()
    }
}

/// Scores the dataset with the sample rows selected by the mask appended.
#[derive(Clone)]
pub struct AddObjective {
    data: Split,
    sample: Split,
    measure: Arc<dyn DiscMeasure>,
    penalty: Option<Arc<dyn SubsetPenalty>>,
}

impl AddObjective {
    /// Fails with [`Error::ColumnMismatch`] if the sample table does not have
    /// the dataset's columns in the same order.
    pub fn new(
        dataset: &DataFrame,
        sample: &DataFrame,
        columns: &FairnessColumns,
        measure: Arc<dyn DiscMeasure>,
        penalty: Option<Arc<dyn SubsetPenalty>>,
    ) -> Result<Self> {
        if dataset.names() != sample.names() {
            return Err(Error::ColumnMismatch {
                expected: dataset.names().to_vec(),
                actual: sample.names().to_vec(),
            });
        }
        Ok(Self {
            data: Split::new(dataset, columns)?,
            sample: Split::new(sample, columns)?,
            measure,
            penalty,
        })
    }

    /// Mask length: the number of sample rows.
    pub fn dims(&self) -> usize {
        self.sample.len()
    }
}

impl Objective for AddObjective {
    fn evaluate(&self, bits: &[bool]) -> Result<f64> {
        check_len(bits, self.dims())?;
        let combined = self.data.concat(&self.sample.filter(bits)?)?;
        Ok(combined.score(self.measure.as_ref(), self.penalty.as_deref()))
    }
}

impl fmt::Debug for AddObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddObjective")
            .field("rows", &self.data.len())
            .field("sample_rows", &self.dims())
            .field("penalized", &self.penalty.is_some())
            .finish()
    }
}

/// The objective built for one `fit`: remove rows or add sample rows.
#[derive(Debug, Clone)]
pub enum FitnessAdapter {
    Remove(RemoveObjective),
    Add(AddObjective),
}

impl FitnessAdapter {
    /// Length of the binary vectors this adapter scores.
    pub fn dims(&self) -> usize {
        match self {
            FitnessAdapter::Remove(obj) => obj.dims(),
            FitnessAdapter::Add(obj) => obj.dims(),
        }
    }
}

impl Objective for FitnessAdapter {
    fn evaluate(&self, bits: &[bool]) -> Result<f64> {
        match self {
            FitnessAdapter::Remove(obj) => obj.evaluate(bits),
            FitnessAdapter::Add(obj) => obj.evaluate(bits),
        }
    }
}

/// One-shot `f_remove`: score `dataframe` restricted to the rows where
/// `binary_vector` is `true`.
pub fn f_remove(
    binary_vector: &[bool],
    dataframe: &DataFrame,
    columns: &FairnessColumns,
    measure: &dyn DiscMeasure,
    penalty: Option<&dyn SubsetPenalty>,
) -> Result<f64> {
    check_len(binary_vector, dataframe.n_rows())?;
    let kept = Split::new(dataframe, columns)?.filter(binary_vector)?;
    Ok(kept.score(measure, penalty))
}

/// One-shot `f_add`: score `dataframe` with the rows of `sample_dataframe`
/// selected by `binary_vector` appended.
pub fn f_add(
    binary_vector: &[bool],
    dataframe: &DataFrame,
    sample_dataframe: &DataFrame,
    columns: &FairnessColumns,
    measure: &dyn DiscMeasure,
    penalty: Option<&dyn SubsetPenalty>,
) -> Result<f64> {
    check_len(binary_vector, sample_dataframe.n_rows())?;
    let selected = sample_dataframe.filter(binary_vector)?;
    let combined = dataframe.concat(&selected)?;
    Ok(Split::new(&combined, columns)?.score(measure, penalty))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// |P(y=1 | z=1) - P(y=1 | z=0)| for a single binary protected column.
    fn parity_gap(_x: &DataFrame, y: &[f64], z: &ProtectedAttributes) -> f64 {
        let ProtectedAttributes::Single(z) = z else {
            panic!("expected a single protected attribute");
        };
        let rate = |group: f64| {
            let (pos, total) = y
                .iter()
                .zip(z)
                .filter(|&(_, &g)| g == group)
                .fold((0.0, 0.0), |(p, t), (&label, _)| (p + label, t + 1.0));
            if total == 0.0 {
                0.0
            } else {
                pos / total
            }
        };
        (rate(1.0) - rate(0.0)).abs()
    }

    fn rows_seen(x: &DataFrame, _y: &[f64], _z: &ProtectedAttributes) -> f64 {
        x.n_rows() as f64
    }

    fn dataset() -> DataFrame {
        DataFrame::new(vec![
            ("age", vec![25.0, 32.0, 47.0, 51.0, 38.0, 29.0]),
            ("sex", vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
            ("race", vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]),
            ("label", vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0]),
        ])
        .unwrap()
    }

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            ("age", vec![40.0, 22.0, 60.0]),
            ("sex", vec![0.0, 0.0, 1.0]),
            ("race", vec![1.0, 0.0, 0.0]),
            ("label", vec![1.0, 1.0, 0.0]),
        ])
        .unwrap()
    }

    fn single() -> FairnessColumns {
        FairnessColumns::new("label", ["sex"])
    }

    #[test]
    fn test_remove_all_ones_matches_full_dataset() {
        let df = dataset();
        let split = Split::new(&df, &single()).unwrap();
        let full = parity_gap(&split.x, &split.y, &split.z);

        let obj = RemoveObjective::new(&df, &single(), Arc::new(parity_gap), None).unwrap();
        assert_eq!(obj.dims(), 6);
        assert_eq!(obj.evaluate(&[true; 6]).unwrap(), full);
        assert_eq!(
            f_remove(&[true; 6], &df, &single(), &parity_gap, None).unwrap(),
            full
        );
        assert!((full - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_remove_masks_rows() {
        // Drop the only positive in the sex=0 group and one sex=1 row.
        let obj = RemoveObjective::new(&dataset(), &single(), Arc::new(parity_gap), None).unwrap();
        let mask = [true, true, false, true, true, false];
        assert_eq!(obj.evaluate(&mask).unwrap(), 1.0);

        // Balanced subset: one positive per group.
        let mask = [true, false, false, true, false, true];
        assert_eq!(obj.evaluate(&mask).unwrap(), 0.5);
    }

    #[test]
    fn test_features_exclude_label_and_protected() {
        let seen_columns = |x: &DataFrame, _: &[f64], _: &ProtectedAttributes| {
            assert_eq!(x.names(), &["age".to_string(), "race".to_string()]);
            0.0
        };
        let obj =
            RemoveObjective::new(&dataset(), &single(), Arc::new(seen_columns), None).unwrap();
        obj.evaluate(&[true; 6]).unwrap();
    }

    #[test]
    fn test_only_label_and_protected_columns() {
        let df = DataFrame::new(vec![("sex", vec![1.0, 0.0]), ("label", vec![1.0, 1.0])])
            .unwrap();
        let obj = RemoveObjective::new(&df, &single(), Arc::new(rows_seen), None).unwrap();
        assert_eq!(obj.evaluate(&[true, false]).unwrap(), 1.0);
    }

    #[test]
    fn test_single_vs_multiple_protected() {
        let dims = |_: &DataFrame, _: &[f64], z: &ProtectedAttributes| match z {
            ProtectedAttributes::Single(_) => 1.0,
            ProtectedAttributes::Multiple(rows) => {
                assert!(rows.iter().all(|r| r.len() == 2));
                2.0
            }
        };
        let one = RemoveObjective::new(&dataset(), &single(), Arc::new(dims), None).unwrap();
        assert_eq!(one.evaluate(&[true; 6]).unwrap(), 1.0);

        let two_cols = FairnessColumns::new("label", ["sex", "race"]);
        let two = RemoveObjective::new(&dataset(), &two_cols, Arc::new(dims), None).unwrap();
        assert_eq!(two.evaluate(&[true; 6]).unwrap(), 2.0);
    }

    #[test]
    fn test_multiple_protected_keeps_row_order() {
        let first_row = |_: &DataFrame, _: &[f64], z: &ProtectedAttributes| match z {
            ProtectedAttributes::Multiple(rows) => rows[0][0] * 10.0 + rows[0][1],
            ProtectedAttributes::Single(_) => -1.0,
        };
        let cols = FairnessColumns::new("label", ["sex", "race"]);
        let obj = RemoveObjective::new(&dataset(), &cols, Arc::new(first_row), None).unwrap();
        // Row 1: sex=1, race=1
        let mask = [false, true, true, true, true, true];
        assert_eq!(obj.evaluate(&mask).unwrap(), 11.0);
    }

    #[test]
    fn test_add_all_zeros_matches_original() {
        let df = dataset();
        let split = Split::new(&df, &single()).unwrap();
        let original = parity_gap(&split.x, &split.y, &split.z);

        let obj =
            AddObjective::new(&df, &sample(), &single(), Arc::new(parity_gap), None).unwrap();
        assert_eq!(obj.dims(), 3);
        assert_eq!(obj.evaluate(&[false; 3]).unwrap(), original);
        assert_eq!(
            f_add(&[false; 3], &df, &sample(), &single(), &parity_gap, None).unwrap(),
            original
        );
    }

    #[test]
    fn test_add_appends_selected_rows() {
        let obj = AddObjective::new(&dataset(), &sample(), &single(), Arc::new(rows_seen), None)
            .unwrap();
        assert_eq!(obj.evaluate(&[true, false, true]).unwrap(), 8.0);

        // Adding two positives to the sex=0 group closes part of the gap.
        let fair =
            AddObjective::new(&dataset(), &sample(), &single(), Arc::new(parity_gap), None)
                .unwrap();
        let before = fair.evaluate(&[false, false, false]).unwrap();
        let after = fair.evaluate(&[true, true, false]).unwrap();
        assert!(after < before);
        assert_eq!(
            after,
            f_add(&[true, true, false], &dataset(), &sample(), &single(), &parity_gap, None)
                .unwrap()
        );
    }

    #[test]
    fn test_add_rejects_mismatched_sample() {
        let other = DataFrame::new(vec![("age", vec![1.0]), ("label", vec![0.0])]).unwrap();
        let err = AddObjective::new(&dataset(), &other, &single(), Arc::new(rows_seen), None)
            .unwrap_err();
        assert!(matches!(err, Error::ColumnMismatch { .. }));
    }

    #[test]
    fn test_penalty_added_identically() {
        let penalty: Arc<dyn SubsetPenalty> = Arc::new(CardinalityPenalty::new(4, Penalty::Absolute));
        let remove = RemoveObjective::new(
            &dataset(),
            &single(),
            Arc::new(rows_seen),
            Some(penalty.clone()),
        )
        .unwrap();
        // 3 rows kept: measure 3, penalty |3 - 4| = 1
        assert_eq!(remove.evaluate(&[true, true, true, false, false, false]).unwrap(), 4.0);

        let add = AddObjective::new(
            &dataset(),
            &sample(),
            &single(),
            Arc::new(rows_seen),
            Some(penalty.clone()),
        )
        .unwrap();
        // 6 + 1 rows: measure 7, penalty |7 - 4| = 3
        assert_eq!(add.evaluate(&[false, true, false]).unwrap(), 10.0);

        let via_fn = f_remove(
            &[true, true, true, false, false, false],
            &dataset(),
            &single(),
            &rows_seen,
            Some(penalty.as_ref()),
        )
        .unwrap();
        assert_eq!(via_fn, 4.0);
    }

    #[test]
    fn test_closure_penalty_with_captured_parameters() {
        let weight = 0.5;
        let label_sum = move |_: &DataFrame, y: &[f64], _: &ProtectedAttributes| {
            weight * y.iter().sum::<f64>()
        };
        let obj = RemoveObjective::new(
            &dataset(),
            &single(),
            Arc::new(rows_seen),
            Some(Arc::new(label_sum)),
        )
        .unwrap();
        // all rows: 6 + 0.5 * 4
        assert_eq!(obj.evaluate(&[true; 6]).unwrap(), 8.0);
    }

    #[test]
    fn test_cardinality_penalty_weight_and_zero_target() {
        let z = ProtectedAttributes::Single(vec![]);
        let x = DataFrame::default();
        let p = CardinalityPenalty::new(4, Penalty::Normalized).with_weight(2.0);
        assert_eq!(p.penalty(&x, &[1.0, 0.0], &z), 1.0);
        let off = CardinalityPenalty::new(0, Penalty::Absolute);
        assert_eq!(off.penalty(&x, &[1.0, 0.0, 1.0], &z), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let obj = RemoveObjective::new(&dataset(), &single(), Arc::new(rows_seen), None).unwrap();
        assert_eq!(
            obj.evaluate(&[true; 5]).unwrap_err(),
            Error::DimensionMismatch {
                expected: 6,
                actual: 5
            }
        );
        let add = FitnessAdapter::Add(
            AddObjective::new(&dataset(), &sample(), &single(), Arc::new(rows_seen), None)
                .unwrap(),
        );
        assert_eq!(add.dims(), 3);
        assert!(add.evaluate(&[true; 6]).is_err());
    }

    #[test]
    fn test_unknown_columns() {
        let cols = FairnessColumns::new("missing", ["sex"]);
        let err = RemoveObjective::new(&dataset(), &cols, Arc::new(rows_seen), None).unwrap_err();
        assert_eq!(err, Error::UnknownColumn("missing".into()));

        let none: [&str; 0] = [];
        let cols = FairnessColumns::new("label", none);
        assert!(matches!(
            RemoveObjective::new(&dataset(), &cols, Arc::new(rows_seen), None),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_selection_is_scored() {
        let obj = RemoveObjective::new(&dataset(), &single(), Arc::new(parity_gap), None).unwrap();
        assert_eq!(obj.evaluate(&[false; 6]).unwrap(), 0.0);
    }
}
