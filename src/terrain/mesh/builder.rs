// ============================================
// Terrain Mesh Builder - Меш чанка из карты высот
// ============================================
//
// Карта высот приходит с кольцом границы (+1 клетка с каждой стороны).
// Вершины границы участвуют только в расчёте нормалей и в буферы не попадают,
// поэтому освещение на стыке чанков совпадает без данных соседа.
//
//   LOD 0 -> шаг 1 (полное разрешение)
//   LOD n -> шаг 2n

use ultraviolet::Vec3;

use crate::terrain::generation::HeightMap;
use super::curve::HeightCurve;
use super::vertex::TerrainVertex;

/// Максимальный поддерживаемый уровень упрощения
pub const MAX_SIMPLIFICATION_LOD: usize = 6;

/// Шаг выборки вершин для уровня упрощения
#[inline]
pub fn simplification_increment(lod: usize) -> usize {
    if lod == 0 { 1 } else { lod * 2 }
}

/// Готовый меш чанка
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    /// Позиции вершин кольца границы (за пределами видимой области)
    pub border_positions: Vec<[f32; 3]>,
    /// Уровень упрощения, с которым построен меш
    pub lod: usize,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Треугольники как тройки индексов (для коллайдеров)
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Буферы построения: индексы >= 0 - видимые вершины, < 0 - граница (-1, -2, ...)
struct MeshBuffers {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    border_positions: Vec<[f32; 3]>,
    border_triangles: Vec<[i32; 3]>,
}

impl MeshBuffers {
    fn with_capacity(vertices_per_line: usize) -> Self {
        let quads = vertices_per_line.saturating_sub(1).pow(2);
        Self {
            vertices: Vec::with_capacity(vertices_per_line * vertices_per_line),
            indices: Vec::with_capacity(quads * 6),
            border_positions: Vec::with_capacity(vertices_per_line * 4 + 4),
            border_triangles: Vec::with_capacity(vertices_per_line * 8 + 8),
        }
    }

    fn add_vertex(&mut self, position: [f32; 3], uv: [f32; 2], index: i32) {
        if index < 0 {
            self.border_positions.push(position);
        } else {
            self.vertices.push(TerrainVertex::new(position, uv));
        }
    }

    fn add_triangle(&mut self, a: i32, b: i32, c: i32) {
        if a < 0 || b < 0 || c < 0 {
            self.border_triangles.push([a, b, c]);
        } else {
            self.indices.extend_from_slice(&[a as u32, b as u32, c as u32]);
        }
    }

    fn position(&self, index: i32) -> Vec3 {
        if index < 0 {
            Vec3::from(self.border_positions[(-index - 1) as usize])
        } else {
            Vec3::from(self.vertices[index as usize].position)
        }
    }

    fn surface_normal(&self, a: i32, b: i32, c: i32) -> Vec3 {
        let pa = self.position(a);
        let side_ab = self.position(b) - pa;
        let side_ac = self.position(c) - pa;
        let normal = side_ab.cross(side_ac);
        let len = normal.mag();
        if len > 1e-8 { normal / len } else { Vec3::zero() }
    }

    /// Нормали по всем треугольникам, включая треугольники границы
    fn calculate_normals(&mut self) {
        let mut normals = vec![Vec3::zero(); self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as i32, tri[1] as i32, tri[2] as i32);
            let normal = self.surface_normal(a, b, c);
            normals[a as usize] += normal;
            normals[b as usize] += normal;
            normals[c as usize] += normal;
        }

        for &[a, b, c] in &self.border_triangles {
            let normal = self.surface_normal(a, b, c);
            for index in [a, b, c] {
                if index >= 0 {
                    normals[index as usize] += normal;
                }
            }
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            let len = normal.mag();
            vertex.normal = if len > 1e-8 { (normal / len).into() } else { [0.0, 1.0, 0.0] };
        }
    }

    fn finish(self, lod: usize) -> MeshData {
        MeshData {
            vertices: self.vertices,
            indices: self.indices,
            border_positions: self.border_positions,
            lod,
        }
    }
}

/// Построить меш по карте высот с кольцом границы.
///
/// Высота вершины = `curve(h) * height_multiplier`. Центр меша в начале координат,
/// строки карты идут в сторону -Z. Слишком маленькая карта даёт пустой меш.
pub fn build_terrain_mesh(
    height_map: &HeightMap,
    height_multiplier: f32,
    curve: &HeightCurve,
    lod: usize,
) -> MeshData {
    let increment = simplification_increment(lod);
    let bordered_w = height_map.width();
    let bordered_h = height_map.height();
    if bordered_w < 3 || bordered_h < 3 {
        return MeshData { lod, ..MeshData::default() };
    }

    // Последняя выбираемая клетка по каждой оси (кратна шагу)
    let last_x = (bordered_w - 1) / increment * increment;
    let last_y = (bordered_h - 1) / increment * increment;
    if last_x <= 2 * increment || last_y <= 2 * increment {
        return MeshData { lod, ..MeshData::default() };
    }

    // Видимая область в мировых единицах (без кольца границы)
    let extent_w = (bordered_w - 3) as f32;
    let extent_h = (bordered_h - 3) as f32;
    let top_left_x = extent_w / -2.0;
    let top_left_z = extent_h / 2.0;
    // Длина внутренней части в клетках исходной карты
    let span_x = (last_x - 2 * increment) as f32;
    let span_y = (last_y - 2 * increment) as f32;

    let columns = last_x / increment + 1;
    let rows = last_y / increment + 1;
    let slot = |x: usize, y: usize| (y / increment) * columns + x / increment;

    // Проход 1: индексы вершин
    let mut vertex_indices = vec![0i32; columns * rows];
    let mut mesh_index = 0i32;
    let mut border_index = -1i32;
    for y in (0..=last_y).step_by(increment) {
        for x in (0..=last_x).step_by(increment) {
            let is_border = x == 0 || y == 0 || x == last_x || y == last_y;
            if is_border {
                vertex_indices[slot(x, y)] = border_index;
                border_index -= 1;
            } else {
                vertex_indices[slot(x, y)] = mesh_index;
                mesh_index += 1;
            }
        }
    }

    // Проход 2: вершины и треугольники (тот же порядок обхода)
    let mut buffers = MeshBuffers::with_capacity(columns.saturating_sub(2));
    for y in (0..=last_y).step_by(increment) {
        for x in (0..=last_x).step_by(increment) {
            let index = vertex_indices[slot(x, y)];
            let percent_x = (x as f32 - increment as f32) / span_x;
            let percent_y = (y as f32 - increment as f32) / span_y;
            let height = curve.evaluate(height_map.get(x, y)) * height_multiplier;
            let position = [
                top_left_x + percent_x * extent_w,
                height,
                top_left_z - percent_y * extent_h,
            ];
            buffers.add_vertex(position, [percent_x, percent_y], index);

            if x < last_x && y < last_y {
                let a = vertex_indices[slot(x, y)];
                let b = vertex_indices[slot(x + increment, y)];
                let c = vertex_indices[slot(x, y + increment)];
                let d = vertex_indices[slot(x + increment, y + increment)];
                buffers.add_triangle(a, d, c);
                buffers.add_triangle(d, a, b);
            }
        }
    }

    buffers.calculate_normals();
    buffers.finish(lod)
}
