//! Artifact decoding benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docsearch_artifact::{decode_json, decode_table, encode_json, encode_table};
use docsearch_bench::utils::generate_entries;

/// Benchmark decoding the same entries from each format.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for count in [1_000, 10_000].iter() {
        let entries = generate_entries(*count, 42);
        let json = encode_json(&entries).unwrap();
        let table = encode_table(&entries).unwrap();

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("json", count), &json, |b, data| {
            b.iter(|| black_box(decode_json(black_box(data)).unwrap()));
        });

        group.throughput(Throughput::Bytes(table.len() as u64));
        group.bench_with_input(BenchmarkId::new("table", count), &table, |b, data| {
            b.iter(|| black_box(decode_table(black_box(data)).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark encoding a binary table.
fn bench_encode(c: &mut Criterion) {
    let entries = generate_entries(10_000, 42);
    c.bench_function("encode_table", |b| {
        b.iter(|| black_box(encode_table(black_box(&entries)).unwrap()));
    });
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
