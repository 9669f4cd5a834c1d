// ============================================
// Terrain Config - Параметры генерации и стриминга
// ============================================
//
// Неизменяемая конфигурация: читается из JSON, проверяется при создании
// хранилища чанков. Горячей перезагрузки нет - при изменении хранилище
// пересоздаётся.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::terrain::generation::color::validate_region_order;
use crate::terrain::generation::{default_regions, NoiseParams, TerrainRegion, TerrainRegions};
use crate::terrain::lod::{validate_ladder, LodLadder, LodLevel};
use crate::terrain::mesh::{simplification_increment, MeshSettings, MAX_SIMPLIFICATION_LOD};

/// Вершин на сторону чанка по умолчанию (240 делится на все шаги LOD 0..6)
pub const DEFAULT_CHUNK_VERTICES: usize = 239;

/// Пороги выдачи коллайдеров
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Индекс ступени лестницы LOD, чей меш идёт в коллайдер
    pub lod_index: usize,
    /// Дальность предзагрузки меша коллайдера (None - дальность ступени `lod_index`)
    pub prefetch_distance: Option<f32>,
    /// Дальность установки коллайдера
    pub install_distance: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            lod_index: 0,
            prefetch_distance: None,
            install_distance: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Видимых вершин на сторону чанка
    pub chunk_vertices: usize,
    pub noise: NoiseParams,
    /// Регионы раскраски, пороги по возрастанию
    pub regions: Vec<TerrainRegion>,
    /// Вычитать карту затухания (острова)
    pub use_falloff: bool,
    pub mesh: MeshSettings,
    pub lod_levels: Vec<LodLevel>,
    pub collision: CollisionSettings,
    /// Минимальный сдвиг наблюдателя для полного прохода видимости
    pub viewer_move_threshold: f32,
    /// Размер пула генерации (0 - по числу ядер)
    pub worker_threads: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_vertices: DEFAULT_CHUNK_VERTICES,
            noise: NoiseParams::default(),
            regions: default_regions(),
            use_falloff: false,
            mesh: MeshSettings::default(),
            lod_levels: LodLevel::DEFAULT_LEVELS.to_vec(),
            collision: CollisionSettings::default(),
            viewer_move_threshold: 25.0,
            worker_threads: 0,
        }
    }
}

impl TerrainConfig {
    /// Загрузить конфигурацию из JSON строки (отсутствующие поля - по умолчанию)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Загрузить конфигурацию из файла
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Сторона карты высот с кольцом границы
    pub fn map_size(&self) -> usize {
        self.chunk_vertices + 2
    }

    /// Размер чанка в мировых единицах
    pub fn chunk_world_size(&self) -> f32 {
        self.chunk_vertices.saturating_sub(1) as f32
    }

    pub fn max_view_distance(&self) -> f32 {
        self.lod_levels.last().map_or(0.0, |l| l.visible_distance)
    }

    /// Дальность предзагрузки меша коллайдера
    pub fn collision_prefetch_distance(&self) -> f32 {
        self.collision.prefetch_distance.unwrap_or_else(|| {
            self.lod_levels
                .get(self.collision.lod_index)
                .map_or(0.0, |l| l.visible_distance)
        })
    }

    pub fn lod_ladder(&self) -> Result<LodLadder, ConfigError> {
        LodLadder::new(self.lod_levels.clone())
    }

    pub fn terrain_regions(&self) -> Result<TerrainRegions, ConfigError> {
        TerrainRegions::new(self.regions.clone())
    }

    /// Проверить согласованность параметров
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_vertices < 3 {
            return Err(ConfigError::ChunkTooSmall(self.chunk_vertices));
        }
        validate_region_order(&self.regions)?;
        validate_ladder(&self.lod_levels)?;
        if !self.viewer_move_threshold.is_finite() || self.viewer_move_threshold < 0.0 {
            return Err(ConfigError::ViewerMoveThreshold(self.viewer_move_threshold));
        }

        // Шаг LOD должен делить сторону карты с границей без остатка
        let span = self.map_size() - 1;
        for level in &self.lod_levels {
            let stride = simplification_increment(level.lod);
            if level.lod > MAX_SIMPLIFICATION_LOD || span % stride != 0 || span <= 2 * stride {
                return Err(ConfigError::LodStride {
                    lod: level.lod,
                    stride,
                    chunk_vertices: self.chunk_vertices,
                });
            }
        }

        if self.collision.lod_index >= self.lod_levels.len() {
            return Err(ConfigError::CollisionLodOutOfRange {
                index: self.collision.lod_index,
                len: self.lod_levels.len(),
            });
        }
        let prefetch = self.collision_prefetch_distance();
        if self.collision.install_distance > prefetch {
            return Err(ConfigError::CollisionThresholds {
                install: self.collision.install_distance,
                prefetch,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::generation::NormalizeMode;

    #[test]
    fn test_default_is_valid() {
        let config = TerrainConfig::default();
        config.validate().unwrap();
        assert_eq!(config.map_size(), 241);
        assert_eq!(config.chunk_world_size(), 238.0);
        assert_eq!(config.max_view_distance(), 450.0);
        assert_eq!(config.collision_prefetch_distance(), 200.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "chunk_vertices": 23,
            "noise": { "seed": 7, "normalize_mode": "local" },
            "lod_levels": [ { "lod": 0, "visible_distance": 40.0 }, { "lod": 2, "visible_distance": 80.0 } ]
        }"#;
        let config = TerrainConfig::from_json_str(json).unwrap();
        assert_eq!(config.noise.seed, 7);
        assert_eq!(config.noise.normalize_mode, NormalizeMode::Local);
        assert_eq!(config.noise.octaves, 4);
        assert_eq!(config.viewer_move_threshold, 25.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_normalize_mode_rejected() {
        let json = r#"{ "noise": { "normalize_mode": "sideways" } }"#;
        assert!(matches!(TerrainConfig::from_json_str(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = TerrainConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(TerrainConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let small = TerrainConfig { chunk_vertices: 2, ..TerrainConfig::default() };
        assert!(matches!(small.validate(), Err(ConfigError::ChunkTooSmall(2))));

        // 24 не делится на 10 (LOD 5)
        let stride = TerrainConfig {
            chunk_vertices: 23,
            lod_levels: vec![LodLevel::new(0, 50.0), LodLevel::new(5, 100.0)],
            ..TerrainConfig::default()
        };
        assert!(matches!(stride.validate(), Err(ConfigError::LodStride { lod: 5, .. })));

        let mut collision = TerrainConfig::default();
        collision.collision.lod_index = 3;
        assert!(matches!(collision.validate(), Err(ConfigError::CollisionLodOutOfRange { index: 3, len: 3 })));

        let mut thresholds = TerrainConfig::default();
        thresholds.collision.prefetch_distance = Some(10.0);
        thresholds.collision.install_distance = 20.0;
        assert!(matches!(thresholds.validate(), Err(ConfigError::CollisionThresholds { .. })));

        let mut regions = TerrainConfig::default();
        regions.regions.swap(0, 3);
        assert!(matches!(regions.validate(), Err(ConfigError::RegionOrder { .. })));
    }

    #[test]
    fn test_viewer_move_threshold_must_be_usable() {
        for bad in [f32::NAN, -1.0, f32::INFINITY] {
            let config = TerrainConfig { viewer_move_threshold: bad, ..TerrainConfig::default() };
            assert!(matches!(config.validate(), Err(ConfigError::ViewerMoveThreshold(_))), "{bad}");
        }
        let zero = TerrainConfig { viewer_move_threshold: 0.0, ..TerrainConfig::default() };
        zero.validate().unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TerrainConfig::from_file("/definitely/not/here/terrain.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
