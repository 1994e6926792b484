//! GA generation loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use super::config::{Crossover, GaConfig, Mutation};
use super::operators;
use crate::error::{Error, Result};
use crate::objective::{Objective, Solution};
use crate::population::Population;
use crate::random::rng_from;
use log::{debug, info, trace};
use rand::Rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best binary vector seen during the entire run.
    pub best: Vec<bool>,

    /// Objective value of `best`.
    pub best_fitness: f64,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether the run stopped because patience ran out.
    pub stagnated: bool,

    /// Best fitness after each evaluated generation.
    pub fitness_history: Vec<f64>,
}

impl From<GaResult> for Solution {
    fn from(result: GaResult) -> Self {
        Solution {
            bits: result.best,
            fitness: result.best_fitness,
        }
    }
}

/// Executes the GA generation loop.
///
/// # Usage
///
/// ```
/// use fair_subset::ga::{GaConfig, GaRunner};
///
/// let ones = |x: &[bool]| x.iter().filter(|&&b| b).count() as f64;
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_num_generations(30)
///     .with_seed(42);
/// let result = GaRunner::run(&ones, 16, &config).unwrap();
/// assert_eq!(result.best.len(), 16);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        dims: usize,
        config: &GaConfig,
    ) -> Result<GaResult> {
        let mut rng = rng_from(config.seed);
        Self::run_with_rng(objective, dims, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<O: Objective + ?Sized, R: Rng>(
        objective: &O,
        dims: usize,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult> {
        config.validate()?;
        if dims == 0 {
            return Err(Error::InvalidConfig("dims must be at least 1".into()));
        }
        debug!(
            "ga start: dims={dims} pop={} generations={} parents={} selection={:?} crossover={:?} mutation={:?}",
            config.population_size,
            config.num_generations,
            config.num_parents,
            config.selection,
            config.crossover,
            config.mutation,
        );

        let num_offspring = config.population_size - config.num_parents;
        let mut population = Population::random(config.population_size, dims, rng);

        let mut best: Option<Vec<bool>> = None;
        let mut best_fitness = f64::INFINITY;
        let mut fitness_history = Vec::with_capacity(config.num_generations);
        let mut no_improvement = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;

        for gen in 0..config.num_generations {
            let fitness = evaluate_population(objective, &population, config.parallel)?;
            generations = gen + 1;

            // Track best-ever
            let gen_best = argmin(&fitness);
            if best.is_none() || fitness[gen_best] < best_fitness - config.tolerance {
                best = Some(population.row(gen_best).to_vec());
                best_fitness = fitness[gen_best];
                no_improvement = 0;
            } else {
                no_improvement += 1;
            }
            fitness_history.push(best_fitness);
            trace!("ga generation {generations}: best={best_fitness}");

            if config.patience > 0 && no_improvement >= config.patience {
                info!("ga stopped after {generations} generations without improvement for {no_improvement}");
                stagnated = true;
                break;
            }
            if generations == config.num_generations {
                break;
            }

            // Selection
            let parent_idx = config.selection.select(&fitness, config.num_parents, rng);
            let mut next_gen = population.select(&parent_idx);

            // Crossover
            let mut offspring = match config.crossover {
                Crossover::Uniform { p } => {
                    operators::uniform_crossover(&next_gen, num_offspring, p, rng)
                }
                Crossover::KPoint { k } => {
                    operators::kpoint_crossover(&next_gen, num_offspring, k, rng)
                }
            };

            // Mutation
            match config.mutation {
                Mutation::Fractional { rate } => operators::mutate(&mut offspring, rate, rng),
                Mutation::BitFlip { rate } => {
                    operators::bit_flip_mutation(&mut offspring, rate, rng)
                }
                Mutation::Swap => operators::swap_mutation(&mut offspring, rng),
            }

            next_gen.extend(&offspring);
            population = next_gen;
        }

        let best = best.ok_or_else(|| Error::InvalidConfig("no generation was evaluated".into()))?;
        debug!("ga finished: generations={generations} best={best_fitness} stagnated={stagnated}");

        Ok(GaResult {
            best,
            best_fitness,
            generations,
            stagnated,
            fitness_history,
        })
    }
}

/// Minimizes `f` over binary vectors of length `d` with the default operator
/// set (elitist selection, uniform crossover, fractional flip mutation).
///
/// Returns the best vector seen and its fitness.
pub fn genetic_algorithm<O: Objective + ?Sized, R: Rng>(
    f: &O,
    d: usize,
    pop_size: usize,
    num_generations: usize,
    rng: &mut R,
) -> Result<Solution> {
    let config = GaConfig::default()
        .with_population_size(pop_size)
        .with_num_generations(num_generations);
    GaRunner::run_with_rng(f, d, &config, rng).map(Solution::from)
}

/// Evaluate every row, in parallel when enabled.
#[cfg(feature = "parallel")]
fn evaluate_population<O: Objective + ?Sized>(
    objective: &O,
    population: &Population,
    parallel: bool,
) -> Result<Vec<f64>> {
    use rayon::prelude::*;

    if parallel {
        population
            .as_slice()
            .par_chunks(population.dims())
            .map(|row| objective.evaluate(row))
            .collect()
    } else {
        population.rows().map(|row| objective.evaluate(row)).collect()
    }
}

/// Evaluate every row.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<O: Objective + ?Sized>(
    objective: &O,
    population: &Population,
    _parallel: bool,
) -> Result<Vec<f64>> {
    population.rows().map(|row| objective.evaluate(row)).collect()
}

/// Index of the lowest fitness. NaN never wins.
fn argmin(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f < fitness[best] || fitness[best].is_nan() {
            best = i;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::population::count_ones;
    use crate::random::create_rng;

    fn ones(x: &[bool]) -> f64 {
        count_ones(x) as f64
    }

    fn neg_ones(x: &[bool]) -> f64 {
        -(count_ones(x) as f64)
    }

    #[test]
    fn test_onemax_convergence() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_num_generations(200)
            .with_mutation(Mutation::BitFlip { rate: 0.05 })
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&neg_ones, 20, &config).unwrap();

        assert!(
            result.best_fitness <= -15.0,
            "expected fitness <= -15.0 for 20-bit OneMax, got {}",
            result.best_fitness
        );
        assert_eq!(result.best_fitness, neg_ones(&result.best));
    }

    #[test]
    fn test_minimize_ones() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_num_generations(100)
            .with_mutation(Mutation::Fractional { rate: 0.1 })
            .with_seed(7)
            .with_parallel(false);

        let result = GaRunner::run(&ones, 20, &config).unwrap();
        assert!(result.best_fitness <= 5.0, "got {}", result.best_fitness);
    }

    #[test]
    fn test_patience_termination() {
        let constant = |_: &[bool]| 1.0;
        let config = GaConfig::default()
            .with_population_size(10)
            .with_num_generations(1000)
            .with_patience(5)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&constant, 8, &config).unwrap();

        assert!(result.stagnated);
        assert_eq!(result.generations, 6);
        assert_eq!(result.fitness_history.len(), 6);
    }

    #[test]
    fn test_history_non_increasing() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_num_generations(50)
            .with_patience(0)
            .with_seed(42)
            .with_parallel(false);

        let result = GaRunner::run(&ones, 16, &config).unwrap();

        assert_eq!(result.fitness_history.len(), 50);
        assert!(!result.stagnated);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best fitness should never get worse: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_all_operator_combinations_run() {
        for selection in [
            Selection::Elitist,
            Selection::Tournament(3),
            Selection::Roulette,
            Selection::Rank,
        ] {
            for crossover in [Crossover::Uniform { p: 0.5 }, Crossover::KPoint { k: 2 }] {
                for mutation in [
                    Mutation::Fractional { rate: 0.1 },
                    Mutation::BitFlip { rate: 0.1 },
                    Mutation::Swap,
                ] {
                    let config = GaConfig::default()
                        .with_population_size(12)
                        .with_num_generations(10)
                        .with_num_parents(4)
                        .with_selection(selection)
                        .with_crossover(crossover)
                        .with_mutation(mutation)
                        .with_seed(1)
                        .with_parallel(false);
                    let result = GaRunner::run(&ones, 10, &config).unwrap();
                    assert_eq!(result.best.len(), 10);
                    assert_eq!(result.best_fitness, ones(&result.best));
                }
            }
        }
    }

    #[test]
    fn test_no_breeding_after_last_generation() {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_num_generations(1)
            .with_parallel(false);
        let mut rng = create_rng(5);
        let result = GaRunner::run_with_rng(&ones, 12, &config, &mut rng).unwrap();
        assert_eq!(result.generations, 1);

        // Only the initial population should have drawn from the generator.
        let mut expected = create_rng(5);
        let initial = Population::random(8, 12, &mut expected);
        assert_eq!(rng.random::<u64>(), expected.random::<u64>());
        let best = initial.rows().map(ones).fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_fitness, best);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = GaConfig::default()
            .with_population_size(16)
            .with_num_generations(20)
            .with_seed(99)
            .with_parallel(false);
        let a = GaRunner::run(&ones, 12, &config).unwrap();
        let b = GaRunner::run(&ones, 12, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_parallel_flag_gives_valid_result() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_num_generations(40)
            .with_seed(42)
            .with_parallel(true);
        let result = GaRunner::run(&neg_ones, 20, &config).unwrap();
        assert!(result.best_fitness <= -10.0, "got {}", result.best_fitness);
    }

    #[test]
    fn test_objective_error_propagates() {
        struct Failing;
        impl Objective for Failing {
            fn evaluate(&self, bits: &[bool]) -> Result<f64> {
                Err(Error::DimensionMismatch {
                    expected: 3,
                    actual: bits.len(),
                })
            }
        }
        let config = GaConfig::default().with_parallel(false).with_seed(1);
        let err = GaRunner::run(&Failing, 5, &config).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 5
            }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig::default().with_population_size(1);
        assert!(matches!(
            GaRunner::run(&ones, 5, &config),
            Err(Error::InvalidConfig(_))
        ));
        assert!(GaRunner::run(&ones, 0, &GaConfig::default()).is_err());
    }

    #[test]
    fn test_genetic_algorithm_function() {
        let mut rng = create_rng(5);
        let solution = genetic_algorithm(&ones, 15, 20, 30, &mut rng).unwrap();
        assert_eq!(solution.bits.len(), 15);
        assert_eq!(solution.fitness, ones(&solution.bits));
    }

    #[test]
    fn test_argmin_skips_nan() {
        assert_eq!(argmin(&[f64::NAN, 2.0, 1.0]), 2);
        assert_eq!(argmin(&[3.0, 1.0, 1.0]), 1);
    }
}
