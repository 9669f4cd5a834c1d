// ============================================
// Golden Noise - Эталонная сетка шума (seed 1)
// ============================================
//
// Эталон хранится в tests/golden/ как битовые образы f32.
// TERRAIN_BLESS=1 перезаписывает его текущим результатом.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use terrain_stream::{generate_noise_map, NoiseParams, NormalizeMode};

#[derive(Debug, Serialize, Deserialize)]
struct GoldenGrid {
    width: usize,
    height: usize,
    /// `f32::to_bits` каждой клетки (сравнение бит в бит)
    bits: Vec<u32>,
    /// Те же значения для чтения глазами
    values: Vec<f32>,
}

fn golden_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/noise_seed1_10x10.json")
}

fn scenario_params() -> NoiseParams {
    NoiseParams {
        normalize_mode: NormalizeMode::Global,
        scale: 50.0,
        octaves: 4,
        persistence: 0.5,
        lacunarity: 2.0,
        seed: 1,
        offset: [0.0, 0.0],
    }
}

#[test]
fn test_seed1_grid_matches_golden() {
    let map = generate_noise_map(10, 10, &scenario_params(), [0.0, 0.0]);
    assert!(map.values().iter().all(|v| (0.0..=1.0).contains(v)));

    let path = golden_path();
    if std::env::var("TERRAIN_BLESS").map_or(false, |v| v == "1") {
        let grid = GoldenGrid {
            width: 10,
            height: 10,
            bits: map.values().iter().map(|v| v.to_bits()).collect(),
            values: map.values().to_vec(),
        };
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string_pretty(&grid).unwrap()).unwrap();
        return;
    }

    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("golden grid {} missing ({e}); run with TERRAIN_BLESS=1", path.display()));
    let golden: GoldenGrid = serde_json::from_str(&content).unwrap();
    assert_eq!((golden.width, golden.height), (10, 10));
    assert_eq!(golden.bits.len(), 100);
    for (i, (expected, actual)) in golden.bits.iter().zip(map.values()).enumerate() {
        assert_eq!(
            *expected,
            actual.to_bits(),
            "cell ({}, {}): expected {}, got {}",
            i % 10,
            i / 10,
            f32::from_bits(*expected),
            actual
        );
    }
}

#[test]
fn test_seed1_grid_is_repeatable() {
    let a = generate_noise_map(10, 10, &scenario_params(), [0.0, 0.0]);
    let b = generate_noise_map(10, 10, &scenario_params(), [0.0, 0.0]);
    let bits = |m: &terrain_stream::HeightMap| m.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}
