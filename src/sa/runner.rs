//! SA execution loop.

use super::config::SaConfig;
use crate::error::{Error, Result};
use crate::objective::{Objective, Solution};
use crate::penalty::Penalty;
use crate::population::count_ones;
use crate::random::{random_bits, rng_from};
use log::{debug, trace};
use rand::Rng;

/// Result of a Simulated Annealing run.
///
/// `solution` is the **last accepted** state, not the best state ever
/// visited: the solver keeps no elite.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// Final binary vector.
    pub solution: Vec<bool>,

    /// Objective value of `solution`, penalty included when constrained.
    pub fitness: f64,

    /// Number of steps taken.
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,
}

impl From<SaResult> for Solution {
    fn from(result: SaResult) -> Self {
        Solution {
            bits: result.solution,
            fitness: result.fitness,
        }
    }
}

/// Executes the Simulated Annealing solver over binary vectors.
///
/// Each step flips one uniformly chosen bit and applies the Metropolis
/// criterion, then cools the temperature geometrically.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a generator seeded from `config.seed`.
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        dims: usize,
        config: &SaConfig,
    ) -> Result<SaResult> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(objective, dims, config, &mut rng)
    }

    /// Runs SA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<O: Objective + ?Sized, R: Rng>(
        objective: &O,
        dims: usize,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult> {
        config.validate()?;
        if dims == 0 {
            return Err(Error::InvalidConfig("dims must be at least 1".into()));
        }
        let n = config.constraint;
        debug!(
            "sa start: dims={dims} t_max={} t_min={} cooling={} max_iter={} constraint={n} penalty={:?}",
            config.initial_temperature,
            config.min_temperature,
            config.cooling_rate,
            config.max_iterations,
            config.penalty,
        );

        let mut current = random_bits(dims, rng);
        let mut current_fitness = penalized(objective, &current, n, config.penalty)?;

        let mut temperature = config.initial_temperature;
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        while temperature > config.min_temperature && iteration < config.max_iterations {
            // Neighbor: flip one bit in place, undo on rejection
            let i = rng.random_range(0..dims);
            current[i] = !current[i];
            let new_fitness = penalized(objective, &current, n, config.penalty)?;
            let delta = new_fitness - current_fitness;

            if delta < 0.0 {
                improving_moves += 1;
            }
            if metropolis_accept(delta, temperature, rng) {
                current_fitness = new_fitness;
                accepted_moves += 1;
            } else {
                current[i] = !current[i];
            }

            trace!("sa step {iteration}: t={temperature:.3e} delta={delta:.4} fitness={current_fitness}");
            temperature *= config.cooling_rate;
            iteration += 1;
        }

        debug!(
            "sa finished: iterations={iteration} t={temperature:.3e} fitness={current_fitness} accepted={accepted_moves}"
        );

        Ok(SaResult {
            solution: current,
            fitness: current_fitness,
            iterations: iteration,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
        })
    }
}

/// Metropolis acceptance probability `exp(-delta / temperature)`.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    (-delta / temperature).exp()
}

/// Metropolis criterion.
///
/// Improvements (`delta < 0`) are always accepted without drawing from
/// `rng`; otherwise a fresh uniform draw in `[0, 1)` must fall below
/// [`acceptance_probability`].
pub fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    delta < 0.0 || acceptance_probability(delta, temperature) > rng.random::<f64>()
}

/// `f(x)`, plus `penalty(x, n)` when the constraint is active and violated.
fn penalized<O: Objective + ?Sized>(
    objective: &O,
    bits: &[bool],
    n: usize,
    penalty: Penalty,
) -> Result<f64> {
    let value = objective.evaluate(bits)?;
    if n != 0 && count_ones(bits) != n {
        Ok(value + penalty.apply(bits, n))
    } else {
        Ok(value)
    }
}

/// Constrained SA: minimizes `f` over `{0,1}^d`, penalizing vectors whose
/// number of ones differs from `n` (`n = 0` disables the constraint).
///
/// Returns the final state and its penalized fitness.
#[allow(clippy::too_many_arguments)]
pub fn simulated_annealing_constraint<O: Objective + ?Sized, R: Rng>(
    f: &O,
    d: usize,
    n: usize,
    t_max: f64,
    t_min: f64,
    cooling_rate: f64,
    max_iter: usize,
    penalty: Penalty,
    rng: &mut R,
) -> Result<Solution> {
    let config = SaConfig::default()
        .with_initial_temperature(t_max)
        .with_min_temperature(t_min)
        .with_cooling_rate(cooling_rate)
        .with_max_iterations(max_iter)
        .with_constraint(n, penalty);
    SaRunner::run_with_rng(f, d, &config, rng).map(Solution::from)
}

/// Unconstrained SA.
pub fn simulated_annealing<O: Objective + ?Sized, R: Rng>(
    f: &O,
    d: usize,
    t_max: f64,
    t_min: f64,
    cooling_rate: f64,
    max_iter: usize,
    rng: &mut R,
) -> Result<Solution> {
    simulated_annealing_constraint(
        f,
        d,
        0,
        t_max,
        t_min,
        cooling_rate,
        max_iter,
        Penalty::default(),
        rng,
    )
}

/// SA with the [`SaConfig::method`] preset.
pub fn simulated_annealing_method<O: Objective + ?Sized, R: Rng>(
    f: &O,
    dims: usize,
    rng: &mut R,
) -> Result<Solution> {
    SaRunner::run_with_rng(f, dims, &SaConfig::method(), rng).map(Solution::from)
}
