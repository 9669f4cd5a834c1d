// ============================================
// Errors - Ошибки конфигурации и запуска
// ============================================

use std::path::PathBuf;

use thiserror::Error;

/// Ошибки загрузки и проверки `TerrainConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("region #{index} ({name}) has NaN threshold or breaks ascending height order")]
    RegionOrder { index: usize, name: String },
    #[error("LOD ladder is empty")]
    EmptyLodLadder,
    #[error("LOD ladder entry #{index}: visible distance must be positive and strictly increasing")]
    LodLadderOrder { index: usize },
    #[error("LOD {lod} (stride {stride}) does not divide chunk of {chunk_vertices} vertices")]
    LodStride { lod: usize, stride: usize, chunk_vertices: usize },
    #[error("collision LOD index {index} is outside the LOD ladder ({len} entries)")]
    CollisionLodOutOfRange { index: usize, len: usize },
    #[error("collider install distance {install} exceeds prefetch distance {prefetch}")]
    CollisionThresholds { install: f32, prefetch: f32 },
    #[error("viewer move threshold {0} must be finite and non-negative")]
    ViewerMoveThreshold(f32),
    #[error("chunk of {0} vertices is too small (need at least 3)")]
    ChunkTooSmall(usize),
}

/// Ошибки создания хранилища чанков
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
