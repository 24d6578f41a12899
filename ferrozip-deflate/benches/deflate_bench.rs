//! Performance benchmarks for DEFLATE compression and decompression.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ferrozip_deflate::{deflate, inflate};
use std::hint::black_box;

/// Repeating English text, highly compressible.
fn text_data(size: usize) -> Vec<u8> {
    let pattern = b"The quick brown fox jumps over the lazy dog. ";
    let mut data = Vec::with_capacity(size + pattern.len());
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

fn bench_deflate(c: &mut Criterion) {
    let mut group = c.benchmark_group("deflate");

    for size in [4096, 65536, 1 << 20] {
        let data = text_data(size);
        group.throughput(Throughput::Bytes(size as u64));
        for level in [1u8, 6, 9] {
            group.bench_with_input(
                BenchmarkId::new(format!("level{}", level), size),
                &data,
                |b, data| {
                    b.iter(|| deflate(black_box(data), level).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_inflate(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflate");

    for size in [4096, 65536, 1 << 20] {
        let data = text_data(size);
        let compressed = deflate(&data, 6).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &compressed,
            |b, compressed| {
                b.iter(|| inflate(black_box(compressed)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_deflate, bench_inflate);
criterion_main!(benches);
