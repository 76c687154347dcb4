//! Benchmarks for rest-position and color regeneration.
//!
//! Run with: `cargo bench --bench shape_gen`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use morphcloud::prelude::*;
use morphcloud::{color, shape, SpawnContext};

fn bench_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_50k");
    let mut buf = vec![0.0; 50_000 * 3];

    for s in Shape::ALL {
        group.bench_function(s.name(), |b| {
            let mut ctx = SpawnContext::seeded(42);
            b.iter(|| shape::generate_with(&mut ctx, black_box(s), 2.0, &mut buf))
        });
    }

    group.finish();
}

fn bench_colors(c: &mut Criterion) {
    let mut buf = vec![0.0; 50_000 * 3];
    let base = Rgb::new(0.8, 0.0, 1.0);

    c.bench_function("assign_colors_50k", |b| {
        let mut ctx = SpawnContext::seeded(7);
        b.iter(|| color::assign_with(&mut ctx, black_box(base), &mut buf))
    });
}

fn bench_shape_change(c: &mut Criterion) {
    let mut engine = ParticleStateEngine::new(50_000, Shape::Heart, 2.0, Rgb::new(0.8, 0.0, 1.0));

    c.bench_function("engine_set_shape_50k", |b| {
        let mut next = Shape::Ring;
        b.iter(|| {
            engine.set_shape(next);
            next = if next == Shape::Ring { Shape::Heart } else { Shape::Ring };
        })
    });
}

criterion_group!(benches, bench_shapes, bench_colors, bench_shape_change);
criterion_main!(benches);
