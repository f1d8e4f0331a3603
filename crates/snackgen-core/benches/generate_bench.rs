//! # Generation Benchmarks
//!
//! Throughput of seeded generation over the bundled catalog.
//!
//! Run with: `cargo bench -p snackgen-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use snackgen_core::{
    Catalog, Component, GenerateOptions, PlanOptions, Planner, RuleMap, SeededRng, bundled,
    generate,
};
use std::hint::black_box;

/// Synthetic catalog: `bases` bases sharing one rule, `adds` add-ons.
fn create_wide_catalog(bases: usize, adds: usize) -> Catalog {
    let mut components: Vec<Component> = (0..bases)
        .map(|i| Component::new(format!("Base {i}"), "base.wide", true))
        .collect();
    components.extend((0..adds).map(|i| Component::new(format!("Add {i}"), "add.wide", false)));

    let mut rules = RuleMap::new();
    rules.insert("base.wide".to_string(), vec!["add.wide".to_string()]);
    Catalog::new(components, rules).expect("synthetic catalog")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_seeded_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeded_rng");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("shuffle", size), size, |b, &size| {
            let mut items: Vec<usize> = (0..size).collect();
            b.iter(|| {
                SeededRng::new("bench").shuffle(&mut items);
                black_box(&items);
            });
        });
    }

    group.finish();
}

fn bench_atomic(c: &mut Criterion) {
    let catalog = bundled().expect("bundled");
    let mut group = c.benchmark_group("atomic");

    for limit in [2, 10, 40].iter() {
        let opts = GenerateOptions::atomic(*limit).with_seed("bench");
        group.bench_with_input(BenchmarkId::from_parameter(limit), &opts, |b, opts| {
            b.iter(|| black_box(generate(catalog, opts)));
        });
    }

    group.finish();
}

fn bench_combos(c: &mut Criterion) {
    let catalog = bundled().expect("bundled");
    let mut group = c.benchmark_group("combos");

    for limit in [4, 12, 50].iter() {
        let opts = GenerateOptions::combos(*limit).with_seed("bench");
        group.bench_with_input(BenchmarkId::from_parameter(limit), &opts, |b, opts| {
            b.iter(|| black_box(generate(catalog, opts)));
        });
    }

    group.finish();
}

fn bench_locked_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("locked_fallback");

    for size in [10, 50, 200].iter() {
        let catalog = create_wide_catalog(*size, *size);
        let opts = GenerateOptions::combos(*size)
            .with_seed("bench")
            .with_locked_base("Base 0");
        group.bench_with_input(BenchmarkId::from_parameter(size), &opts, |b, opts| {
            b.iter(|| black_box(generate(&catalog, opts)));
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let catalog = bundled().expect("bundled");
    let planner = Planner::new(catalog);
    let options = PlanOptions::new("bench").with_windows(&["10:30", "15:00", "20:30"]);

    c.bench_function("plan_three_windows", |b| {
        b.iter(|| black_box(planner.plan(&options)));
    });
}

criterion_group!(
    benches,
    bench_seeded_rng,
    bench_atomic,
    bench_combos,
    bench_locked_fallback,
    bench_plan
);
criterion_main!(benches);
