//! Benchmarks for solow-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::{Array1, Array2};
use rand::Rng;
use solow_math::{ArimaModel, ArimaOrder, linear_trend, ordinary_least_squares};

/// Trending series with multiplicative noise, like a nominal GDP path.
fn random_trend(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut level = 100.0;
    (0..n)
        .map(|_| {
            level *= 1.0 + 0.03 + rng.r#gen::<f64>() * 0.04 - 0.02;
            level
        })
        .collect()
}

fn bench_ordinary_least_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordinary_least_squares");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = rand::thread_rng();
            let y = Array1::from_iter((0..size).map(|_| rng.r#gen::<f64>()));
            let x = Array2::from_shape_fn((size, 3), |(_, j)| if j == 0 { 1.0 } else { rng.r#gen() });
            b.iter(|| ordinary_least_squares(black_box(&y), black_box(&x)).unwrap());
        });
    }

    group.finish();
}

fn bench_linear_trend(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_trend");

    for size in [10, 30, 70] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let years: Vec<f64> = (0..size).map(|i| 1950.0 + i as f64).collect();
            let values = random_trend(size);
            b.iter(|| linear_trend(black_box(&years), black_box(&values)).unwrap());
        });
    }

    group.finish();
}

fn bench_arima_fit_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("arima_111_fit_forecast");
    group.sample_size(30);

    // Annual macro series are short: a few decades at most.
    for size in [8, 30, 70] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let values = random_trend(size);
            b.iter(|| {
                ArimaModel::fit(black_box(&values), ArimaOrder::default())
                    .and_then(|model| model.forecast(5))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ordinary_least_squares, bench_linear_trend, bench_arima_fit_forecast);
criterion_main!(benches);
