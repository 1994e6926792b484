//! Binary genetic operators.
//!
//! Mutation and crossover over a [`Population`] of binary vectors. Mutations
//! work in place on the offspring batch; crossovers read the parents and
//! build a fresh batch, so parents are never modified.
//!
//! # Mutation Operators
//!
//! - [`mutate`]: flip exactly `floor(rate * d)` distinct bits per row
//! - [`bit_flip_mutation`]: flip each bit independently with probability `rate`
//! - [`swap_mutation`]: exchange two distinct positions per row
//!
//! Only [`swap_mutation`] preserves the number of ones in a row, which makes
//! it the operator of choice when the cardinality constraint is already met.
//!
//! # Crossover Operators
//!
//! - [`uniform_crossover`]: each bit drawn from one of two parents
//! - [`kpoint_crossover`]: alternate parent source between `k` cut points
//!
//! Offspring `k` is bred from parents `k % m` and `(k + 1) % m`, where `m`
//! is the number of parent rows.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - De Jong & Spears (1992), "A formal analysis of the role of multi-point
//!   crossover in genetic algorithms"

use crate::population::Population;
use rand::seq::index;
use rand::Rng;

// ============================================================================
// Mutation operators
// ============================================================================

/// Fractional flip mutation: flip a fixed number of random bits per row.
///
/// For each row, `floor(mutation_rate * d)` distinct positions are drawn
/// uniformly without replacement and inverted. Every row flips exactly that
/// many bits.
///
/// # Complexity
/// O(n · d) worst case
pub fn mutate<R: Rng>(offspring: &mut Population, mutation_rate: f64, rng: &mut R) {
    let d = offspring.dims();
    let num_mutation = ((mutation_rate * d as f64) as usize).min(d);
    if num_mutation == 0 {
        return;
    }
    for row in offspring.rows_mut() {
        for i in index::sample(rng, d, num_mutation) {
            row[i] = !row[i];
        }
    }
}

/// Bit-flip mutation: flip each bit with probability `mutation_rate`.
///
/// The expected number of flips per row is `mutation_rate * d`, but the
/// actual count varies from row to row. Rates outside `[0, 1]` are clamped
/// and NaN is treated as 0.
///
/// # Complexity
/// O(n · d)
pub fn bit_flip_mutation<R: Rng>(offspring: &mut Population, mutation_rate: f64, rng: &mut R) {
    let p = if mutation_rate.is_nan() {
        0.0
    } else {
        mutation_rate.clamp(0.0, 1.0)
    };
    for row in offspring.rows_mut() {
        for bit in row.iter_mut() {
            if rng.random_bool(p) {
                *bit = !*bit;
            }
        }
    }
}

/// Swap mutation: exchange the values at two distinct random positions.
///
/// Preserves the number of ones in every row. Rows shorter than two bits
/// are left untouched.
///
/// # Complexity
/// O(n)
pub fn swap_mutation<R: Rng>(offspring: &mut Population, rng: &mut R) {
    let d = offspring.dims();
    if d < 2 {
        return;
    }
    for row in offspring.rows_mut() {
        let (i, j) = distinct_pair(d, rng);
        row.swap(i, j);
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Uniform crossover.
///
/// Produces `num_offspring` children. Each bit of a child comes from its
/// first parent with probability `p` and from its second parent otherwise.
///
/// # Panics
/// Panics if `parents` is empty while `num_offspring > 0`.
pub fn uniform_crossover<R: Rng>(
    parents: &Population,
    num_offspring: usize,
    p: f64,
    rng: &mut R,
) -> Population {
    let d = parents.dims();
    let p = p.clamp(0.0, 1.0);
    let mut offspring = Population::zeros(num_offspring, d);

    for k in 0..num_offspring {
        let (first, second) = parent_pair(parents, k);
        let child = offspring.row_mut(k);
        for i in 0..d {
            child[i] = if rng.random_bool(p) { first[i] } else { second[i] };
        }
    }

    offspring
}

/// k-point crossover.
///
/// Draws `k` distinct cut points in `1..d` (clamped to `d - 1`), then fills
/// each child segment by segment, switching parent at every cut. The first
/// segment comes from the first parent.
///
/// # Panics
/// Panics if `parents` is empty while `num_offspring > 0`.
pub fn kpoint_crossover<R: Rng>(
    parents: &Population,
    num_offspring: usize,
    k: usize,
    rng: &mut R,
) -> Population {
    let d = parents.dims();
    let mut offspring = Population::zeros(num_offspring, d);

    for n in 0..num_offspring {
        let (first, second) = parent_pair(parents, n);
        let cuts = cut_points(d, k, rng);
        let child = offspring.row_mut(n);

        let mut start = 0;
        for (segment, &end) in cuts.iter().chain(std::iter::once(&d)).enumerate() {
            let source = if segment % 2 == 0 { first } else { second };
            child[start..end].copy_from_slice(&source[start..end]);
            start = end;
        }
    }

    offspring
}

// ============================================================================
// Helpers
// ============================================================================

/// Parents of offspring `k`: rows `k % m` and `(k + 1) % m`.
fn parent_pair(parents: &Population, k: usize) -> (&[bool], &[bool]) {
    let m = parents.len();
    assert!(m > 0, "crossover needs at least one parent");
    (parents.row(k % m), parents.row((k + 1) % m))
}

/// Sorted, distinct cut positions in `1..d`.
fn cut_points<R: Rng>(d: usize, k: usize, rng: &mut R) -> Vec<usize> {
    if d < 2 {
        return Vec::new();
    }
    let k = k.min(d - 1);
    let mut cuts: Vec<usize> = index::sample(rng, d - 1, k)
        .into_iter()
        .map(|i| i + 1)
        .collect();
    cuts.sort_unstable();
    cuts
}

/// Two distinct indices in `0..n`. Requires `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    (picked.index(0), picked.index(1))
}

// ============================================================================
// Tests
// ============================================================================
