//! Criterion benchmarks for the subset-selection solvers and operators.
//!
//! Uses synthetic objectives (OneMax, a cardinality target) to measure
//! pure search overhead independent of any dataset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fair_subset::ga::operators::{kpoint_crossover, mutate, uniform_crossover};
use fair_subset::ga::{GaConfig, GaRunner};
use fair_subset::penalty::Penalty;
use fair_subset::population::Population;
use fair_subset::random::create_rng;
use fair_subset::sa::{SaConfig, SaRunner};

// ===========================================================================
// Objectives
// ===========================================================================

/// Minimize the number of zeros.
fn onemax(x: &[bool]) -> f64 {
    x.iter().filter(|&&b| !b).count() as f64
}

/// Prefer the first half of the indices, penalized towards a target count.
fn prefix_weight(x: &[bool]) -> f64 {
    let half = x.len() / 2;
    x.iter()
        .enumerate()
        .filter(|&(i, &b)| b && i >= half)
        .count() as f64
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_onemax");
    group.sample_size(10);

    for (dims, pop, gen) in [(50usize, 50usize, 50usize), (200, 100, 30), (1000, 100, 20)] {
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_num_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dims, pop, gen), dims),
            &(dims, config),
            |b, (d, c)| {
                b.iter(|| {
                    let result = GaRunner::run(&onemax, black_box(*d), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_sa_constrained(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_constrained");
    group.sample_size(10);

    for &dims in &[50usize, 200, 1000] {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(0.01)
            .with_cooling_rate(0.99)
            .with_max_iterations(1000)
            .with_constraint(dims / 4, Penalty::Normalized)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dims), &config, |b, c| {
            b.iter(|| {
                let result = SaRunner::run(&prefix_weight, black_box(dims), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    let mut rng = create_rng(42);
    let parents = Population::random(2, 1000, &mut rng);

    group.bench_function("uniform_2x1000", |b| {
        b.iter(|| black_box(uniform_crossover(black_box(&parents), 100, 0.5, &mut rng)))
    });
    group.bench_function("kpoint_2x1000", |b| {
        b.iter(|| black_box(kpoint_crossover(black_box(&parents), 100, 2, &mut rng)))
    });
    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut rng = create_rng(42);
    let mut offspring = Population::random(100, 1000, &mut rng);

    c.bench_function("mutate_100x1000", |b| {
        b.iter(|| mutate(black_box(&mut offspring), 0.05, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_ga_onemax,
    bench_sa_constrained,
    bench_crossover,
    bench_mutation
);
criterion_main!(benches);
