//! Read-path benchmarks for layered-config.
//!
//! Measures:
//! - Typed reads from a single leaf
//! - Reads through chains of increasing depth (worst case: key in last layer)
//! - Namespace carving on leaves and chains

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use layered_config::prelude::*;
use std::sync::Arc;

fn store(layer: usize, keys: usize) -> FlatStore {
    (0..keys)
        .map(|i| (format!("layer{layer}.section{}.key{i}", i % 10), i.to_string()))
        .chain([(format!("only.in.layer{layer}"), layer.to_string())])
        .collect()
}

fn chain(depth: usize, keys: usize) -> ChainConfiguration {
    let items: Vec<Arc<dyn Configuration>> = (0..depth)
        .map(|layer| Arc::new(LeafConfiguration::new(store(layer, keys))) as Arc<dyn Configuration>)
        .collect();
    ChainConfiguration::new(items).expect("non-empty chain")
}

/// Benchmark single-leaf typed reads
fn benchmark_leaf_reads(c: &mut Criterion) {
    let config = LeafConfiguration::new(store(0, 1_000));

    let mut group = c.benchmark_group("leaf_reads");
    group.bench_function("get_string", |b| {
        b.iter(|| black_box(config.get_string("layer0.section3.key13").unwrap()));
    });
    group.bench_function("get_integer", |b| {
        b.iter(|| black_box(config.get_integer("layer0.section3.key13").unwrap()));
    });
    group.bench_function("missing_with_default", |b| {
        b.iter(|| black_box(config.get_integer_or("absent", 7).unwrap()));
    });
    group.finish();
}

/// Benchmark reads that fall through every layer of a chain
fn benchmark_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_depth");

    for depth in [1, 2, 4, 8] {
        let config = chain(depth, 100);
        let key = format!("only.in.layer{}", depth - 1);

        group.bench_with_input(BenchmarkId::from_parameter(depth), &key, |b, key| {
            b.iter(|| black_box(config.get_integer(key).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark namespace carving
fn benchmark_carving(c: &mut Criterion) {
    let leaf = LeafConfiguration::new(store(0, 1_000));
    let layered = chain(4, 250);

    let mut group = c.benchmark_group("carving");
    group.bench_function("leaf_namespace", |b| {
        b.iter(|| black_box(leaf.get_namespace("layer0.section5").unwrap()));
    });
    group.bench_function("chain_namespace", |b| {
        b.iter(|| black_box(layered.get_namespace("only.in").unwrap()));
    });
    group.bench_function("chain_keys_union", |b| {
        b.iter(|| {
            let fresh = chain(4, 250);
            black_box(fresh.keys().len());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_leaf_reads,
    benchmark_chain_depth,
    benchmark_carving
);
criterion_main!(benches);
