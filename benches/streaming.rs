use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::Vec3;

use terratile::chunk::{Chunk, ChunkCoord};
use terratile::config::{GridConfig, NoiseParams};
use terratile::streaming::ChunkStreamingManager;
use terratile::terrain::noise::fractal_noise;

fn bench_fractal_noise(c: &mut Criterion) {
    let params = NoiseParams::default();

    c.bench_function("fractal_noise_grid_65", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for z in 0..65 {
                for x in 0..65 {
                    sum += fractal_noise(
                        black_box(x as f32 * 0.4),
                        black_box(z as f32 * 0.4),
                        &params,
                    );
                }
            }
            sum
        });
    });
}

fn bench_chunk_generate_64(c: &mut Criterion) {
    let config = GridConfig::default();

    c.bench_function("chunk_generate_64", |b| {
        b.iter(|| Chunk::generate(black_box(ChunkCoord::new(3, -2)), &config));
    });
}

fn bench_chunk_generate_16(c: &mut Criterion) {
    let config = GridConfig {
        size_x: 16,
        size_z: 16,
        ..Default::default()
    };

    c.bench_function("chunk_generate_16", |b| {
        b.iter(|| Chunk::generate(black_box(ChunkCoord::new(3, -2)), &config));
    });
}

fn bench_manager_tick_stationary(c: &mut Criterion) {
    let config = GridConfig {
        size_x: 8,
        size_z: 8,
        ..Default::default()
    };
    let mut manager = ChunkStreamingManager::new(config, Vec3::ZERO).unwrap();

    // Window already complete: the tick is pure scan cost
    c.bench_function("manager_tick_stationary", |b| {
        b.iter(|| manager.tick(black_box(Vec3::ZERO)));
    });
}

fn bench_manager_walk(c: &mut Criterion) {
    let config = GridConfig {
        size_x: 8,
        size_z: 8,
        ..Default::default()
    };
    let span = config.chunk_span_x();

    // Steady forward walk: periodic column eviction plus one load per tick
    c.bench_function("manager_walk_100_ticks", |b| {
        b.iter(|| {
            let mut manager =
                ChunkStreamingManager::new(config.clone(), Vec3::ZERO).unwrap();
            let mut pos = Vec3::ZERO;
            for _ in 0..100 {
                pos.x += span / 4.0;
                black_box(manager.tick(pos));
            }
            manager.loaded_count()
        });
    });
}

criterion_group!(
    benches,
    bench_fractal_noise,
    bench_chunk_generate_64,
    bench_chunk_generate_16,
    bench_manager_tick_stationary,
    bench_manager_walk,
);
criterion_main!(benches);
