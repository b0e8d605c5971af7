use criterion::{Criterion, criterion_group, criterion_main};
use pairsort::batch;
use pairsort::config;
use pairsort::sorter;
use std::hint::black_box;

const MOCK_CONFIG: &str = r#"
[output]
format = "json"

[batch]
threads = 4
fail_fast = true
"#;

fn reversed_input(n: usize) -> String {
    (0..n)
        .rev()
        .map(|i| format!("k{:05} v{}", i, i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_sort(c: &mut Criterion) {
    let small = "a3 n2 a1 n3 a2 n1";
    let large = reversed_input(10_000);

    c.bench_function("sort_small", |b| {
        b.iter(|| sorter::second_ordered_by_first(black_box(small)).unwrap())
    });

    c.bench_function("sort_10k_pairs_reversed", |b| {
        b.iter(|| sorter::second_ordered_by_first(black_box(&large)).unwrap())
    });
}

fn bench_parse_pairs(c: &mut Criterion) {
    let large = reversed_input(10_000);
    c.bench_function("parse_pairs_10k", |b| {
        b.iter(|| sorter::parse_pairs(black_box(&large)).unwrap())
    });
}

fn bench_batch(c: &mut Criterion) {
    let lines: Vec<String> = (0..2_000).map(|_| reversed_input(50)).collect();
    c.bench_function("transform_lines_2k", |b| {
        b.iter(|| batch::transform_lines(black_box(&lines), None).unwrap())
    });
}

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_pairsort_toml", |b| {
        b.iter(|| config::parse_config(black_box(MOCK_CONFIG)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_sort,
    bench_parse_pairs,
    bench_batch,
    bench_config_parse
);
criterion_main!(benches);
