// ============================================
// Map Data - Карта высот + карта цветов чанка
// ============================================

use super::color::TerrainRegions;
use super::falloff::generate_falloff_map;
use super::height_map::HeightMap;
use super::noise::{generate_noise_map, NoiseParams};

/// Результат генерации данных чанка.
///
/// Обе карты включают кольцо границы (+1 клетка с каждой стороны),
/// видимая часть - клетки `1..size-1`. Текстура строится уже без кольца.
#[derive(Clone, Debug, PartialEq)]
pub struct MapData {
    pub height_map: HeightMap,
    /// Цвет каждой клетки, параллельно `height_map` (с кольцом границы)
    pub color_map: Vec<[f32; 3]>,
}

/// Генератор данных карты (thread-safe, без изменяемого состояния)
#[derive(Clone, Debug)]
pub struct MapGenerator {
    noise: NoiseParams,
    regions: TerrainRegions,
    map_size: usize,
    /// Кэш карты затухания под `map_size`
    falloff: Option<HeightMap>,
}

impl MapGenerator {
    /// `map_size` - сторона карты с учётом кольца границы
    pub fn new(noise: NoiseParams, regions: TerrainRegions, map_size: usize, use_falloff: bool) -> Self {
        let falloff = use_falloff.then(|| generate_falloff_map(map_size));
        Self { noise, regions, map_size, falloff }
    }

    pub fn map_size(&self) -> usize {
        self.map_size
    }

    pub fn regions(&self) -> &TerrainRegions {
        &self.regions
    }

    /// Сгенерировать карту высот и цветов для чанка с центром `center`
    pub fn generate(&self, center: [f32; 2]) -> MapData {
        let noise_map = generate_noise_map(self.map_size, self.map_size, &self.noise, center);

        let height_map = match &self.falloff {
            Some(falloff) => noise_map.map_cells(|x, y, h| (h - falloff.get(x, y)).clamp(0.0, 1.0)),
            None => noise_map,
        };

        let color_map = height_map
            .values()
            .iter()
            .map(|&h| self.regions.color_for(h))
            .collect();

        MapData { height_map, color_map }
    }
}
