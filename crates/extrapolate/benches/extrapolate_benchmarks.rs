//! Benchmarks for solow-extrapolate dispatch.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::Rng;
use solow_extrapolate::{DispatchConfig, ExtrapolationDispatcher, GDP_LIKE};
use solow_primitives::{Panel, names};

fn random_panel(n_years: usize) -> Panel {
    let mut rng = rand::thread_rng();
    let start = 2024 - n_years as i32;
    let mut panel = Panel::new((start..2024).collect());

    let mut trending = |base: f64, growth: f64| {
        let mut level = base;
        (0..n_years)
            .map(|_| {
                level *= 1.0 + growth + rng.r#gen::<f64>() * 0.02 - 0.01;
                Some(level)
            })
            .collect::<Vec<_>>()
    };

    for &column in GDP_LIKE {
        panel.set_column(column, trending(100.0, 0.04));
    }
    panel.set_column(names::POPULATION, trending(50.0, 0.01));
    panel.set_column(names::LABOR_FORCE, trending(25.0, 0.01));
    panel.set_column(names::HUMAN_CAPITAL, trending(2.0, 0.005));
    panel.set_column(names::FDI_PCT_GDP, trending(2.0, 0.0));
    panel.set_column(names::TAX_PCT_GDP, trending(15.0, 0.0));
    panel
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.sample_size(20);

    let dispatcher =
        ExtrapolationDispatcher::with_config(DispatchConfig { end_year: 2030, ..DispatchConfig::default() });

    for n_years in [10, 30, 60] {
        let panel = random_panel(n_years);
        group.bench_with_input(BenchmarkId::from_parameter(n_years), &panel, |b, panel| {
            b.iter(|| dispatcher.dispatch(black_box(panel.clone()), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
