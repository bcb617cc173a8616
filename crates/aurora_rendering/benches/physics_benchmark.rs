//! # Physics Benchmark
//!
//! One integration step over a full pool, plus spawn-template creation.
//!
//! Run with: `cargo bench --package aurora_rendering`

// Benchmarks don't need docs
#![allow(missing_docs)]

use aurora_rendering::{update_particle, Particle, Spawner};
use aurora_shared::{Bounds, ParticleKind, ParticleTypeConfig, SpawnRegion, ValueRange, Vec2};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bubble() -> ParticleTypeConfig {
    ParticleTypeConfig {
        kind: ParticleKind::Bubble,
        spawn_weight: 1.0,
        spawn_region: SpawnRegion::Anywhere,
        size: ValueRange::new(4.0, 24.0),
        speed: ValueRange::new(20.0, 60.0),
        direction: ValueRange::new(-2.0, -1.1),
        opacity: ValueRange::new(0.2, 0.7),
        color: [0.7, 0.85, 1.0, 1.0],
        lifetime: Some(12.0),
    }
}

fn bench_integrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_particle");
    let bounds = Bounds::default();
    let config = bubble();
    let forces = [Vec2::new(0.4, -0.2), Vec2::new(-3.0, 1.0)];

    for count in [50, 200, 1_000] {
        let mut spawner = Spawner::new(7);
        let mut particles: Vec<Particle> =
            (0..count).map(|_| spawner.create_particle(&config, bounds)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let gravity = Vec2::new(0.0, -4.0);
                let mut expired = 0_u32;
                for particle in &mut particles {
                    if update_particle(particle, 1.0 / 120.0, bounds, gravity, &forces) {
                        expired += 1;
                    }
                }
                black_box(expired)
            });
        });
    }

    group.finish();
}

fn bench_spawn(c: &mut Criterion) {
    let types = [bubble()];
    let bounds = Bounds::default();
    let mut spawner = Spawner::new(11);

    c.bench_function("spawn_template", |b| {
        b.iter(|| {
            let kind = spawner.select_particle_type(&types);
            black_box(kind.map(|kind| spawner.create_particle(kind, bounds)))
        });
    });
}

criterion_group!(benches, bench_integrate, bench_spawn);
criterion_main!(benches);
