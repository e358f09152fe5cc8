//! Benchmarks for the per-frame simulation step.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use warpfield::{Facing, FrameBuffer, Starfield, StepParams};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

fn params(speed: f32) -> StepParams {
    StepParams {
        speed,
        facing: Facing::Forward,
        light_threshold: 80.0,
        max_speed: 100.0,
    }
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for count in [500usize, 2_000, 10_000] {
        for (label, speed) in [("rest", 0.0), ("cruise", 40.0), ("lightspeed", 95.0)] {
            group.bench_with_input(BenchmarkId::new(label, count), &count, |b, &count| {
                let mut field = Starfield::seed(WIDTH, HEIGHT, count, SmallRng::seed_from_u64(1));
                let mut frame = FrameBuffer::new(WIDTH, HEIGHT, [0, 0, 0]);
                let p = params(speed);
                b.iter(|| field.step(black_box(&p), &mut frame))
            });
        }
    }

    group.finish();
}

fn bench_seed(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed");

    for count in [500usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut field = Starfield::seed(WIDTH, HEIGHT, count, SmallRng::seed_from_u64(1));
            b.iter(|| field.set_density(black_box(count)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_seed);
criterion_main!(benches);
