// ============================================
// Chunk Coord - Координата чанка в бесконечной сетке
// ============================================

use ultraviolet::Vec2;

/// Целочисленная координата чанка (ключ хранилища)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Чанк, в котором находится точка (ближайший центр)
    pub fn from_world(position: Vec2, chunk_size: f32) -> Self {
        Self {
            x: (position.x / chunk_size).round() as i32,
            y: (position.y / chunk_size).round() as i32,
        }
    }

    /// Центр чанка в мировых координатах
    pub fn center(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.y as f32 * chunk_size)
    }

    pub fn bounds(&self, chunk_size: f32) -> ChunkBounds {
        ChunkBounds::from_center(self.center(chunk_size), chunk_size)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Квадрат чанка на плоскости земли
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ChunkBounds {
    pub fn from_center(center: Vec2, size: f32) -> Self {
        let half = Vec2::broadcast(size * 0.5);
        Self { min: center - half, max: center + half }
    }

    /// Расстояние от точки до квадрата (0 внутри)
    pub fn distance_to(&self, point: Vec2) -> f32 {
        let clamped = point.clamped(self.min, self.max);
        (point - clamped).mag()
    }
}
