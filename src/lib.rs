// ============================================
// Terrain Stream - Процедурный рельеф со стримингом чанков
// ============================================

pub mod terrain;
pub mod config;
pub mod error;
pub mod physics;
pub mod texture;

pub use config::{CollisionSettings, TerrainConfig};
pub use error::{ConfigError, TerrainError};
pub use physics::RapierColliderSink;
pub use texture::TerrainTexture;
pub use terrain::*;
