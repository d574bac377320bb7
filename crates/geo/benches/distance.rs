//! Benchmarks for geo crate refinement and normalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seaway_geo::{
    distance, CoordinateNormalizer, CoordinateToken, GeoPoint, Notation, PassageRefiner,
};

fn create_test_tokens(count: usize) -> Vec<CoordinateToken> {
    (0..count)
        .map(|i| {
            // Walk along the Maine coast, one minute at a time
            let minutes = i % 60;
            CoordinateToken::named(format!("Feature {i}"), format!("44{minutes:02}00N 068{minutes:02}00W"))
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let bucks_harbour = GeoPoint::new(44.3367, -68.7425);
    let somes_sound = GeoPoint::new(44.3333, -68.3117);

    c.bench_function("haversine_single", |b| {
        b.iter(|| distance(black_box(&bucks_harbour), black_box(&somes_sound)))
    });
}

fn bench_refinement(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_passage");
    let passage = [GeoPoint::new(44.3367, -68.7425), GeoPoint::new(51.5074, -0.1276)];

    for spacing in [100.0, 10.0, 1.0].iter() {
        let refiner = PassageRefiner::new(*spacing).expect("positive spacing");
        group.bench_with_input(BenchmarkId::new("fixed", spacing), spacing, |b, _| {
            b.iter(|| refiner.refine(black_box(&passage)))
        });
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_lenient");
    let normalizer = CoordinateNormalizer::new(Notation::Dms);

    for size in [10, 100, 1000].iter() {
        let tokens = create_test_tokens(*size);
        group.bench_with_input(BenchmarkId::new("dms", size), size, |b, _| {
            b.iter(|| normalizer.normalize_lenient(black_box(&tokens)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_refinement, bench_normalization);
criterion_main!(benches);
