//! Index build and search benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docsearch_bench::utils::{generate_entries, keystrokes};
use docsearch_core::{IndexConfig, SymbolIndex};

/// Benchmark building an index.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for count in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let entries = generate_entries(count, 42);
            b.iter_batched(
                || entries.clone(),
                |entries| {
                    let output = SymbolIndex::build(entries, &IndexConfig::default());
                    black_box(output);
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Benchmark one query per keystroke, limited like a result popup.
fn bench_keystrokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("keystrokes");

    for count in [1_000, 10_000, 100_000].iter() {
        let index = SymbolIndex::build(generate_entries(*count, 42), &IndexConfig::default()).index;
        let typed = keystrokes("multassign");

        group.bench_with_input(BenchmarkId::from_parameter(count), &typed, |b, typed| {
            b.iter(|| {
                for prefix in typed {
                    black_box(index.search(black_box(prefix), Some(20)));
                }
            });
        });
    }
    group.finish();
}

/// Benchmark an unlimited one-character query against a substring scan.
fn bench_wide_queries(c: &mut Criterion) {
    let index = SymbolIndex::build(generate_entries(10_000, 7), &IndexConfig::default()).index;
    let mut group = c.benchmark_group("wide_query");

    group.bench_function("prefix", |b| {
        b.iter(|| black_box(index.search(black_box("m"), None)));
    });
    group.bench_function("substring", |b| {
        b.iter(|| black_box(index.search_substring(black_box("size"), None)));
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_keystrokes, bench_wide_queries);
criterion_main!(benches);
