// ============================================
// Mesh Module - Построение мешей чанков
// ============================================

pub mod vertex;
pub mod curve;
pub mod builder;

pub use vertex::TerrainVertex;
pub use curve::HeightCurve;
pub use builder::{build_terrain_mesh, simplification_increment, MeshData, MAX_SIMPLIFICATION_LOD};

use serde::{Deserialize, Serialize};

/// Параметры преобразования высоты в геометрию
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    pub height_multiplier: f32,
    pub height_curve: HeightCurve,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            height_multiplier: 30.0,
            height_curve: HeightCurve::Linear,
        }
    }
}

impl MeshSettings {
    /// Минимальная и максимальная высота меша (для шейдера раскраски)
    pub fn height_range(&self) -> (f32, f32) {
        let low = self.height_curve.evaluate(0.0) * self.height_multiplier;
        let high = self.height_curve.evaluate(1.0) * self.height_multiplier;
        (low.min(high), low.max(high))
    }
}
