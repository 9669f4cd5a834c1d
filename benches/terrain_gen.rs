//! Criterion benchmarks for terrain generation.
//!
//! Benchmarks:
//!   - noise map for one bordered chunk (241x241), Global and Local
//!   - full map data (noise + falloff + colors)
//!   - mesh build per LOD (0, 1, 4)
//!
//! Run with: cargo bench --bench terrain_gen

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use terrain_stream::terrain::generation::{default_regions, TerrainRegions};
use terrain_stream::{
    build_terrain_mesh, generate_noise_map, HeightCurve, MapGenerator, NoiseParams, NormalizeMode,
    TerrainConfig,
};

// ---------------------------------------------------------------------------
// Benchmark: noise map
// ---------------------------------------------------------------------------

fn bench_noise_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_map");
    group.sample_size(20);

    let size = TerrainConfig::default().map_size();
    let global = NoiseParams::default();
    let local = NoiseParams { normalize_mode: NormalizeMode::Local, ..NoiseParams::default() };

    group.bench_function("global_241", |b| {
        b.iter(|| black_box(generate_noise_map(size, size, &global, black_box([238.0, -476.0]))));
    });
    group.bench_function("local_241", |b| {
        b.iter(|| black_box(generate_noise_map(size, size, &local, black_box([238.0, -476.0]))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: map data (noise + falloff + region colors)
// ---------------------------------------------------------------------------

fn bench_map_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_data");
    group.sample_size(20);

    let size = TerrainConfig::default().map_size();
    let regions = TerrainRegions::new(default_regions()).expect("default regions are ordered");
    let generator = MapGenerator::new(NoiseParams::default(), regions, size, true);

    group.bench_function("island_241", |b| {
        b.iter(|| black_box(generator.generate(black_box([0.0, 0.0]))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: mesh build per LOD
// ---------------------------------------------------------------------------

fn bench_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");
    group.sample_size(20);

    let size = TerrainConfig::default().map_size();
    let map = generate_noise_map(size, size, &NoiseParams::default(), [0.0, 0.0]);
    let curve = HeightCurve::Power { exponent: 2.0 };

    for lod in [0usize, 1, 4] {
        group.bench_function(format!("lod_{lod}"), |b| {
            b.iter(|| black_box(build_terrain_mesh(&map, 30.0, &curve, black_box(lod))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_noise_map, bench_map_data, bench_mesh);
criterion_main!(benches);
