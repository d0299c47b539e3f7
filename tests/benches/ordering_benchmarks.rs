//! # Mixin Ordering Benchmarks
//!
//! | Operation | Shape | Expected cost |
//! |-----------|-------|---------------|
//! | Grouping | any | O(N + E) per completion round |
//! | Group sort | chain | O(N²) pairwise analysis |
//! | Group sort | star | O(N²) with a tie at every step |
//! | Build | wide | N singleton groups, no ties |
//! | Cached build | any | one fingerprint + clone |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mixin_ordering::{MemoizedOrdering, MixinOrderingApi, MixinOrderingService};
use mixin_tests::fixtures::{chain_snapshot, random_snapshot, star_snapshot, wide_snapshot};
use std::time::Duration;

// ============================================================================
// Grouping
// ============================================================================

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");
    group.measurement_time(Duration::from_secs(5));
    let service = MixinOrderingService::new();

    for size in [100, 1_000, 4_000] {
        let snapshot = random_snapshot(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("random", size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(service.group_units(snapshot)))
        });
    }

    group.finish();
}

// ============================================================================
// Full builds per shape
// ============================================================================

fn bench_build_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_order");
    group.measurement_time(Duration::from_secs(10));
    let service = MixinOrderingService::new();

    for size in [10, 100, 500] {
        group.throughput(Throughput::Elements(size as u64));

        let chain = chain_snapshot(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &chain, |b, snapshot| {
            b.iter(|| black_box(service.build_order(snapshot).is_ok()))
        });

        let star = star_snapshot(size);
        group.bench_with_input(BenchmarkId::new("star", size), &star, |b, snapshot| {
            b.iter(|| black_box(service.build_order(snapshot).is_ok()))
        });

        let wide = wide_snapshot(size);
        group.bench_with_input(BenchmarkId::new("wide", size), &wide, |b, snapshot| {
            b.iter(|| black_box(service.build_order(snapshot).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// Cache hits vs fingerprinting
// ============================================================================

fn bench_cached_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_build");
    let snapshot = star_snapshot(500);

    group.bench_function("fingerprint", |b| {
        b.iter(|| black_box(snapshot.fingerprint()))
    });

    let cache = MemoizedOrdering::new(MixinOrderingService::new());
    let _ = cache.build_order(&snapshot);
    group.bench_function("hit", |b| {
        b.iter(|| black_box(cache.build_order(&snapshot).is_ok()))
    });

    group.finish();
}

criterion_group!(benches, bench_grouping, bench_build_order, bench_cached_build);
criterion_main!(benches);
