//! Fit/transform preprocessing around a solver.
//!
//! [`HeuristicWrapper`] binds a dataset to a fitness adapter on `fit`, runs a
//! [`Heuristic`] on `transform`, and applies the winning mask to the data.

use crate::error::{Error, Result};
use crate::fitness::{
    AddObjective, DataFrame, DiscMeasure, FairnessColumns, FitnessAdapter, RemoveObjective,
    SubsetPenalty,
};
use crate::ga::{GaConfig, GaRunner};
use crate::objective::{Objective, Solution};
use crate::sa::{SaConfig, SaRunner};
use log::{debug, info};
use std::sync::Arc;

/// How the mask is applied to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Approach {
    /// Keep the dataset rows selected by the mask.
    #[default]
    Remove,
    /// Append the sample rows selected by the mask to the dataset.
    Add,
}

/// A search method over binary vectors of a given length.
///
/// Implemented by [`SaConfig`], [`GaConfig`], and closures
/// `Fn(&dyn Objective, usize) -> Result<Solution>`.
pub trait Heuristic: Send + Sync {
    fn optimize(&self, objective: &dyn Objective, dims: usize) -> Result<Solution>;
}

impl Heuristic for SaConfig {
    fn optimize(&self, objective: &dyn Objective, dims: usize) -> Result<Solution> {
        SaRunner::run(objective, dims, self).map(Solution::from)
    }
}

impl Heuristic for GaConfig {
    fn optimize(&self, objective: &dyn Objective, dims: usize) -> Result<Solution> {
        GaRunner::run(objective, dims, self).map(Solution::from)
    }
}

impl<F> Heuristic for F
where
    F: Fn(&dyn Objective, usize) -> Result<Solution> + Send + Sync,
{
    fn optimize(&self, objective: &dyn Objective, dims: usize) -> Result<Solution> {
        self(objective, dims)
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    dataset: DataFrame,
    sample: Option<DataFrame>,
    adapter: FitnessAdapter,
}

/// Applies a heuristic to select a fair subset of a dataset.
///
/// # Examples
///
/// ```
/// use fair_subset::fitness::{DataFrame, FairnessColumns, ProtectedAttributes};
/// use fair_subset::ga::GaConfig;
/// use fair_subset::wrapper::{Approach, HeuristicWrapper};
///
/// let rows_kept = |x: &DataFrame, _: &[f64], _: &ProtectedAttributes| -(x.n_rows() as f64);
/// let data = DataFrame::new(vec![
///     ("feature", vec![0.3, 0.1, 0.7, 0.2]),
///     ("group", vec![1.0, 0.0, 1.0, 0.0]),
///     ("label", vec![1.0, 0.0, 0.0, 1.0]),
/// ])
/// .unwrap();
///
/// let heuristic = GaConfig::default()
///     .with_population_size(10)
///     .with_num_generations(20)
///     .with_seed(3);
/// let mut wrapper =
///     HeuristicWrapper::new(heuristic, FairnessColumns::new("label", ["group"]), rows_kept);
/// wrapper.fit(&data, None, Approach::Remove, None).unwrap();
/// let fair = wrapper.transform().unwrap();
/// assert!(fair.n_rows() <= data.n_rows());
/// ```
pub struct HeuristicWrapper {
    heuristic: Box<dyn Heuristic>,
    columns: FairnessColumns,
    measure: Arc<dyn DiscMeasure>,
    fitted: Option<Fitted>,
}

impl HeuristicWrapper {
    pub fn new<H, M>(heuristic: H, columns: FairnessColumns, measure: M) -> Self
    where
        H: Heuristic + 'static,
        M: DiscMeasure + 'static,
    {
        Self {
            heuristic: Box::new(heuristic),
            columns,
            measure: Arc::new(measure),
            fitted: None,
        }
    }

    /// Binds the wrapper to a copy of `dataset`.
    ///
    /// `Add` requires `sample`; without it this fails with
    /// [`Error::MissingSampleDataset`]. A previous fit is replaced only on
    /// success.
    pub fn fit(
        &mut self,
        dataset: &DataFrame,
        sample: Option<&DataFrame>,
        approach: Approach,
        penalty: Option<Arc<dyn SubsetPenalty>>,
    ) -> Result<&mut Self> {
        let dataset = dataset.clone();
        let (adapter, sample) = match approach {
            Approach::Remove => {
                let obj =
                    RemoveObjective::new(&dataset, &self.columns, self.measure.clone(), penalty)?;
                (FitnessAdapter::Remove(obj), None)
            }
            Approach::Add => {
                let sample = sample.ok_or(Error::MissingSampleDataset)?.clone();
                let obj = AddObjective::new(
                    &dataset,
                    &sample,
                    &self.columns,
                    self.measure.clone(),
                    penalty,
                )?;
                (FitnessAdapter::Add(obj), Some(sample))
            }
        };
        debug!(
            "fitted {:?} over {} rows, {} search dimensions",
            approach,
            dataset.n_rows(),
            adapter.dims()
        );
        self.fitted = Some(Fitted {
            dataset,
            sample,
            adapter,
        });
        Ok(self)
    }

    /// Search dimension of the current fit.
    pub fn dims(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.adapter.dims())
    }

    /// The objective built by the last `fit`.
    pub fn objective(&self) -> Option<&FitnessAdapter> {
        self.fitted.as_ref().map(|f| &f.adapter)
    }

    /// Runs the heuristic and returns the winning mask.
    pub fn optimize(&self) -> Result<Solution> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let solution = self
            .heuristic
            .optimize(&fitted.adapter, fitted.adapter.dims())?;
        info!(
            "selected {} of {} candidates, fitness {:.6}",
            solution.selected().len(),
            solution.bits.len(),
            solution.fitness
        );
        Ok(solution)
    }

    /// Runs the heuristic and returns the preprocessed table.
    pub fn transform(&self) -> Result<DataFrame> {
        let solution = self.optimize()?;
        self.apply(&solution.bits)
    }

    /// Applies a mask to the fitted data without searching.
    pub fn apply(&self, mask: &[bool]) -> Result<DataFrame> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        match &fitted.sample {
            None => fitted.dataset.filter(mask),
            Some(sample) => fitted.dataset.concat(&sample.filter(mask)?),
        }
    }
}

impl std::fmt::Debug for HeuristicWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicWrapper")
            .field("columns", &self.columns)
            .field("fitted", &self.fitted.is_some())
            .finish()
    }
}

/// A [`HeuristicWrapper`] running the default GA: elitist selection, uniform
/// crossover, fractional bit-flip mutation, 100 individuals, 500 generations.
#[derive(Debug)]
pub struct DefaultPreprocessing {
    inner: HeuristicWrapper,
}

impl DefaultPreprocessing {
    pub fn new<M: DiscMeasure + 'static>(columns: FairnessColumns, measure: M) -> Self {
        Self::with_config(columns, measure, GaConfig::default())
    }

    /// Same wrapper with an explicit GA configuration, e.g. a fixed seed.
    pub fn with_config<M: DiscMeasure + 'static>(
        columns: FairnessColumns,
        measure: M,
        config: GaConfig,
    ) -> Self {
        Self {
            inner: HeuristicWrapper::new(config, columns, measure),
        }
    }

    pub fn fit(
        &mut self,
        dataset: &DataFrame,
        sample: Option<&DataFrame>,
        approach: Approach,
        penalty: Option<Arc<dyn SubsetPenalty>>,
    ) -> Result<&mut Self> {
        self.inner.fit(dataset, sample, approach, penalty)?;
        Ok(self)
    }

    pub fn transform(&self) -> Result<DataFrame> {
        self.inner.transform()
    }

    pub fn wrapper(&self) -> &HeuristicWrapper {
        &self.inner
    }
}
