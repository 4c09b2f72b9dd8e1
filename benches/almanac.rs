use almanac::{clopper_pearson, distribution, heat_index, ZoneResolver};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench(c: &mut Criterion) {
    c.bench_function("clopper_pearson mid", |b| {
        b.iter(|| clopper_pearson(black_box(173), black_box(690), black_box(0.95)));
    });

    c.bench_function("clopper_pearson edge", |b| {
        b.iter(|| clopper_pearson(black_box(0), black_box(690), black_box(0.95)));
    });

    let values: Vec<f64> = (0..690).map(|i| (i as f64 * 0.37).sin() * 8.0 + 27.0).collect();
    c.bench_function("distribution 690 samples", |b| {
        b.iter(|| {
            distribution(
                black_box("temperature"),
                "°C",
                black_box(&values),
                Some(41.0),
                20,
            )
        });
    });

    c.bench_function("heat_index", |b| {
        b.iter(|| heat_index(black_box(33.5), black_box(72.0)));
    });

    let resolver = ZoneResolver::new().unwrap();
    c.bench_function("zone_resolver.resolve", |b| {
        b.iter(|| resolver.resolve(black_box(50.0), black_box(5.0)).unwrap());
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
