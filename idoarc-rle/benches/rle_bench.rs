//! Performance benchmarks for idoarc-rle
//!
//! Measures encode and decode throughput across window widths for data with
//! long runs and data with none.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use idoarc_rle::{RleConfig, decode_bytes, encode_bytes, encode_text};
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    /// Long runs of a single byte
    pub fn runs(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i / 500) as u8).collect()
    }

    /// Pseudo-random bytes with no runs
    pub fn random(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x123456789ABCDEF0;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect()
    }
}

const SIZE: usize = 64 * 1024;

const PATTERNS: [(&str, PatternGenerator); 2] = [
    ("runs", test_data::runs as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
];

const UNIT_SIZES: [usize; 3] = [1, 5, 16];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_bytes");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (pattern_name, generator) in PATTERNS {
        let data = generator(SIZE);
        for unit in UNIT_SIZES {
            let config = RleConfig::new(unit, 99);
            let id = format!("{}/unit{}", pattern_name, unit);
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| black_box(encode_bytes(black_box(data), &config).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_bytes");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (pattern_name, generator) in PATTERNS {
        for unit in UNIT_SIZES {
            let config = RleConfig::new(unit, 99);
            let encoded = encode_bytes(&generator(SIZE), &config).unwrap();
            let id = format!("{}/unit{}", pattern_name, unit);
            group.bench_with_input(BenchmarkId::from_parameter(&id), &encoded, |b, encoded| {
                b.iter(|| black_box(decode_bytes(black_box(encoded), &config).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_encode_text(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. aaaaaaaaaaaaaaaaaaaa "
        .repeat(SIZE / 64);
    let config = RleConfig::DEFAULT;

    let mut group = c.benchmark_group("encode_text");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("sentence", |b| {
        b.iter(|| black_box(encode_text(black_box(&text), &config).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_encode_text);
criterion_main!(benches);
