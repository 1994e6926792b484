//! Parent selection strategies.
//!
//! Selection picks the parent rows that survive into the next generation and
//! breed the offspring. All strategies assume **minimization** (lower
//! fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;
use std::cmp::Ordering;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use fair_subset::ga::Selection;
/// use fair_subset::random::create_rng;
///
/// let fitness = [3.0, 1.0, 2.0, 5.0];
/// let parents = Selection::Elitist.select(&fitness, 2, &mut create_rng(0));
/// assert_eq!(parents, vec![1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Keep the `num_parents` best individuals, best first.
    ///
    /// Deterministic; ties keep population order.
    #[default]
    Elitist,

    /// Tournament selection: pick `k` individuals at random, keep the best.
    ///
    /// Higher `k` = stronger selection pressure.
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection on inverted fitness.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    Roulette,

    /// Linear rank-based selection.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,
}

impl Selection {
    /// Selects `num_parents` indices into `fitness`.
    ///
    /// The stochastic strategies sample with replacement.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select<R: Rng>(&self, fitness: &[f64], num_parents: usize, rng: &mut R) -> Vec<usize> {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Elitist => elitist(fitness, num_parents),
            Selection::Tournament(k) => (0..num_parents)
                .map(|_| tournament(fitness, *k, rng))
                .collect(),
            Selection::Roulette => (0..num_parents).map(|_| roulette(fitness, rng)).collect(),
            Selection::Rank => {
                let order = ascending_order(fitness);
                (0..num_parents).map(|_| rank(&order, rng)).collect()
            }
        }
    }
}

/// Indices sorted by fitness ascending (best first), stable on ties.
fn ascending_order(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        fitness[a]
            .partial_cmp(&fitness[b])
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// The `num_parents` best indices. Repeats from the top when asking for
/// more parents than there are individuals.
fn elitist(fitness: &[f64], num_parents: usize) -> Vec<usize> {
    let order = ascending_order(fitness);
    order.iter().copied().cycle().take(num_parents).collect()
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] < fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection using inverse fitness transformation.
///
/// For minimization: weight_i = max_fitness - fitness_i + epsilon
fn roulette<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let max_fitness = fitness.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let epsilon = 1e-10;

    let weights: Vec<f64> = fitness
        .iter()
        .map(|&f| {
            let w = max_fitness - f + epsilon;
            if w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Linear ranking over a precomputed best-first order: rank r has weight n - r.
fn rank<R: Rng>(order: &[usize], rng: &mut R) -> usize {
    let n = order.len();
    if n == 1 {
        return order[0];
    }

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (r, &original_idx) in order.iter().enumerate() {
        cumulative += (n - r) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1] // fallback
}
