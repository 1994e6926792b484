//! SA configuration.

use crate::error::{Error, Result};
use crate::penalty::Penalty;

/// Configuration for the Simulated Annealing solver.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, one step per
/// iteration. The loop stops when `T <= min_temperature` or after
/// `max_iterations` steps, whichever comes first.
///
/// # Examples
///
/// ```
/// use fair_subset::penalty::Penalty;
/// use fair_subset::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10.0)
///     .with_min_temperature(0.001)
///     .with_cooling_rate(0.99)
///     .with_constraint(25, Penalty::Absolute)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature `T_max`.
    pub initial_temperature: f64,

    /// Minimum temperature `T_min`.
    pub min_temperature: f64,

    /// Multiplicative cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Hard bound on the number of steps, independent of temperature.
    pub max_iterations: usize,

    /// Target number of ones. 0 = unconstrained.
    pub constraint: usize,

    /// Penalty added to candidates that miss the constraint.
    pub penalty: Penalty,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-6,
            cooling_rate: 0.95,
            max_iterations: 1000,
            constraint: 0,
            penalty: Penalty::Normalized,
            seed: None,
        }
    }
}

impl SaConfig {
    /// Quick preset: `T_max = 1`, `T_min = 1e-6`, cooling 0.95, 100 steps,
    /// unconstrained.
    pub fn method() -> Self {
        Self {
            max_iterations: 100,
            ..Self::default()
        }
    }

    /// Sets the initial temperature `T_max`.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the stopping temperature `T_min` (0 runs to `max_iterations`).
    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Sets the geometric cooling factor.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the hard bound on the number of steps.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the cardinality constraint and the penalty used to enforce it.
    pub fn with_constraint(mut self, n: usize, penalty: Penalty) -> Self {
        self.constraint = n;
        self.penalty = penalty;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(Error::InvalidConfig(
                "initial_temperature must be positive".into(),
            ));
        }
        // 0 runs to max_iterations; >= initial_temperature takes no step.
        if !(self.min_temperature >= 0.0) {
            return Err(Error::InvalidConfig(
                "min_temperature must be non-negative".into(),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
