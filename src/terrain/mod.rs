// ============================================
// Terrain Module - Бесконечный рельеф из чанков
// ============================================

pub mod generation;
pub mod mesh;
pub mod cache;
pub mod lod;
pub mod manager;

// Re-exports
pub use generation::{generate_noise_map, HeightMap, MapData, MapGenerator, NoiseParams, NormalizeMode};
pub use mesh::{build_terrain_mesh, HeightCurve, MeshData, MeshSettings, TerrainVertex};
pub use cache::{ChunkBounds, ChunkCoord};
pub use lod::{LodLadder, LodLevel};
pub use manager::{ChunkStore, CollisionSink, GenerationScheduler, RenderSink, StoreStats};
