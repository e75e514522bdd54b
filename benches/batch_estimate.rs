use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waste_impact::{ImpactEstimator, ImpactItem, WasteCategory};

fn sample_items(n: usize) -> Vec<ImpactItem> {
    (0..n)
        .map(|i| {
            let category = WasteCategory::ALL[i % WasteCategory::COUNT];
            ImpactItem::new(category.as_str(), 0.5 + (i % 40) as f64 * 0.75)
        })
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let estimator = ImpactEstimator::builtin();
    let items = sample_items(10_000);

    c.bench_function("estimate_single", |b| {
        b.iter(|| estimator.estimate(black_box("cardboard"), black_box(12.5)))
    });
    c.bench_function("estimate_batch_10k", |b| {
        b.iter(|| estimator.estimate_batch(black_box(&items)))
    });
    c.bench_function("estimate_batch_parallel_10k", |b| {
        b.iter(|| estimator.estimate_batch_parallel(black_box(&items)))
    });
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);
