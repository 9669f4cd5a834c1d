// ============================================
// Terrain Vertex - Структура вершины
// ============================================

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl TerrainVertex {
    /// Размер вершины в байтах (для буферов рендера)
    pub const STRIDE: usize = std::mem::size_of::<TerrainVertex>();

    /// Создать вершину с нормалью вверх
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal: [0.0, 1.0, 0.0], uv }
    }
}
