// benches/displacement_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use midpoint_displacement::{
    CompositeBezierCurve, DisplacedPathBuilder, DisplacementConfig, EdgeType, MidpointDisplacement,
    Point2,
};

fn displacement_benchmark_fn(c: &mut Criterion) {
    let start = Point2::new(0.0, 0.0);
    let end = Point2::new(1000.0, 0.0);

    let mut group = c.benchmark_group("MidpointDisplacement");
    for steps in [4u32, 8, 12] {
        let generator =
            MidpointDisplacement::new(DisplacementConfig::new(steps, 100.0, 1.0).unwrap());
        group.bench_function(format!("generate_steps_{steps}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                generator.generate(black_box(start), black_box(end), black_box(seed))
            })
        });
    }
    group.finish();

    let generator = MidpointDisplacement::new(DisplacementConfig::new(10, 100.0, 1.0).unwrap());
    let points = generator.generate(start, end, 42).unwrap();

    let mut group = c.benchmark_group("CompositeBezierCurve");
    group.bench_function("fit_1025_points", |b| {
        b.iter(|| CompositeBezierCurve::fit(black_box(&points)))
    });
    group.bench_function("curved_path_between", |b| {
        b.iter(|| {
            DisplacedPathBuilder::between(
                black_box(&generator),
                black_box(start),
                black_box(end),
                black_box(7),
                EdgeType::Curved,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, displacement_benchmark_fn);
criterion_main!(benches);
