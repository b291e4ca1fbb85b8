//! Criterion benchmarks for variate_core generators and the full test cycle.
//!
//! Measures generation throughput per family and the cost of a complete
//! generate-bin-evaluate cycle across sample sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use variate_core::generators::{
    generate_exponential, generate_normal, generate_poisson, generate_uniform,
};
use variate_core::prelude::*;

/// Benchmark raw generation for each family.
fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");

    for n in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("uniform", n), &n, |b, &n| {
            let mut rng = SeededSource::from_seed(1);
            b.iter(|| generate_uniform(0.0, 1.0, black_box(n), &mut rng).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("exponential", n), &n, |b, &n| {
            let mut rng = SeededSource::from_seed(2);
            b.iter(|| generate_exponential(1.5, black_box(n), &mut rng).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("normal", n), &n, |b, &n| {
            let mut rng = SeededSource::from_seed(3);
            b.iter(|| generate_normal(0.0, 1.0, black_box(n), &mut rng).unwrap());
        });

        // Knuth's method costs O(lambda) draws per variate
        group.bench_with_input(BenchmarkId::new("poisson_lambda_4", n), &n, |b, &n| {
            let mut rng = SeededSource::from_seed(4);
            b.iter(|| generate_poisson(4.0, black_box(n), &mut rng).unwrap());
        });
    }

    group.finish();
}

/// Benchmark a full cycle with the default bin count.
fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle");

    let families = [
        DistributionParameters::Uniform { a: 0.0, b: 10.0 },
        DistributionParameters::Normal { mu: 0.0, sigma: 1.0 },
        DistributionParameters::Exponential { lambda: 0.5 },
        DistributionParameters::Poisson { lambda: 6.0 },
    ];

    for params in families {
        for n in [1_000, 10_000] {
            group.bench_with_input(
                BenchmarkId::new(params.kind().as_str(), n),
                &n,
                |b, &n| {
                    let mut rng = SeededSource::from_seed(7);
                    b.iter(|| run_cycle(black_box(&params), n, None, &mut rng).unwrap());
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_generators, bench_cycle);
criterion_main!(benches);
