//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generation loop.

use super::selection::Selection;
use crate::error::{Error, Result};

/// Crossover operator applied to the selected parents.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// [`uniform_crossover`](super::operators::uniform_crossover): each bit
    /// comes from the first parent with probability `p`.
    Uniform { p: f64 },

    /// [`kpoint_crossover`](super::operators::kpoint_crossover) with `k` cuts.
    KPoint { k: usize },
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Uniform { p: 0.5 }
    }
}

/// Mutation operator applied to the offspring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// [`mutate`](super::operators::mutate): flip exactly `floor(rate * d)` bits.
    Fractional { rate: f64 },

    /// [`bit_flip_mutation`](super::operators::bit_flip_mutation): flip each
    /// bit with probability `rate`.
    BitFlip { rate: f64 },

    /// [`swap_mutation`](super::operators::swap_mutation): preserves row sums.
    Swap,
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Fractional { rate: 0.05 }
    }
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use fair_subset::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.num_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use fair_subset::ga::{Crossover, GaConfig, Mutation, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::KPoint { k: 2 })
///     .with_mutation(Mutation::BitFlip { rate: 0.01 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of binary vectors in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub num_generations: usize,

    /// Parents kept per generation; the rest of the population is offspring.
    pub num_parents: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    pub crossover: Crossover,

    pub mutation: Mutation,

    /// Generations without improvement before stopping. 0 disables.
    pub patience: usize,

    /// Minimum decrease of the best fitness that counts as improvement.
    pub tolerance: f64,

    /// Whether to evaluate the population in parallel.
    ///
    /// Only has an effect with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 500,
            num_parents: 2,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            patience: 50,
            tolerance: 1e-6,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets how many parents survive each generation.
    pub fn with_num_parents(mut self, n: usize) -> Self {
        self.num_parents = n;
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the patience (0 to disable early stopping).
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Sets the minimum improvement; negative values clamp to 0.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.num_generations == 0 {
            return Err(Error::InvalidConfig(
                "num_generations must be at least 1".into(),
            ));
        }
        if self.num_parents == 0 {
            return Err(Error::InvalidConfig("num_parents must be at least 1".into()));
        }
        if self.num_parents >= self.population_size {
            return Err(Error::InvalidConfig(
                "num_parents too high: parents fill entire population".into(),
            ));
        }
        if self.tolerance < 0.0 {
            return Err(Error::InvalidConfig("tolerance must be non-negative".into()));
        }
        match self.crossover {
            Crossover::Uniform { p } if !(0.0..=1.0).contains(&p) => {
                return Err(Error::InvalidConfig(format!(
                    "uniform crossover p must be in [0, 1], got {p}"
                )));
            }
            _ => {}
        }
        match self.mutation {
            Mutation::Fractional { rate } | Mutation::BitFlip { rate }
                if !(0.0..=1.0).contains(&rate) =>
            {
                return Err(Error::InvalidConfig(format!(
                    "mutation rate must be in [0, 1], got {rate}"
                )));
            }
            _ => {}
        }
        Ok(())
    }
}
