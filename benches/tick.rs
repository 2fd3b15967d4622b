//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use swarm::picking::{intersect, Ray};
use swarm::{FrameInput, Settings, SwarmConfig, SwarmState};

fn settings(count: u32) -> Settings {
    Settings {
        swarm: SwarmConfig {
            count,
            ..SwarmConfig::default()
        },
        ..Settings::default()
    }
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [1_000u32, 25_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut state = SwarmState::with_seed(settings(count), 1);
            let input = FrameInput {
                pointer: Some(Vec2::new(0.3, -0.2)),
                ..Default::default()
            };
            b.iter(|| black_box(state.tick(black_box(&input))))
        });
    }

    group.finish();
}

fn bench_animation(c: &mut Criterion) {
    let mut state = SwarmState::with_seed(settings(25_000), 1);
    c.bench_function("animation_25k", |b| {
        b.iter(|| swarm::animation::tick(state.store_mut(), black_box(Vec3::new(5.0, 0.0, 0.0))))
    });
}

fn bench_intersect(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let store = swarm::ParticleStore::new(25_000, 100.0, 0.005, &mut rng);
    let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.1, 0.05, -1.0));

    c.bench_function("intersect_25k", |b| {
        b.iter(|| black_box(intersect(&ray, black_box(store.as_flat()), None, 1.0)))
    });
}

criterion_group!(benches, bench_tick, bench_animation, bench_intersect);
criterion_main!(benches);
