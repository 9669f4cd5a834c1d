// ============================================
// Terrain Texture - RGBA8 текстура чанка
// ============================================

use crate::terrain::generation::{HeightMap, MapData, FALLBACK_COLOR};

/// Текстура чанка, строки сверху вниз, 4 байта на пиксель
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TerrainTexture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl TerrainTexture {
    /// Текстура из карты цветов (`color_map.len() == width * height`)
    pub fn from_color_map(color_map: &[[f32; 3]], width: usize, height: usize) -> Self {
        let count = (width * height).min(color_map.len());
        let mut pixels = Vec::with_capacity(count * 4);
        for color in &color_map[..count] {
            pixels.extend_from_slice(&[to_byte(color[0]), to_byte(color[1]), to_byte(color[2]), 255]);
        }
        // Недостающие пиксели - прозрачные
        pixels.resize(width * height * 4, 0);
        Self { width, height, pixels }
    }

    /// Серая текстура высот (чёрный - 0, белый - 1)
    pub fn from_height_map(height_map: &HeightMap) -> Self {
        let mut pixels = Vec::with_capacity(height_map.values().len() * 4);
        for &h in height_map.values() {
            let v = to_byte(h);
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
        Self { width: height_map.width(), height: height_map.height(), pixels }
    }

    /// Текстура видимой части чанка: кольцо границы отрезается
    pub fn from_map_data(data: &MapData) -> Self {
        let bordered_w = data.height_map.width();
        let width = bordered_w.saturating_sub(2);
        let height = data.height_map.height().saturating_sub(2);

        let mut colors = Vec::with_capacity(width * height);
        for y in 1..=height {
            for x in 1..=width {
                colors.push(data.color_map.get(y * bordered_w + x).copied().unwrap_or(FALLBACK_COLOR));
            }
        }
        Self::from_color_map(&colors, width, height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_map_to_rgba() {
        let colors = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5, 0.5]];
        let texture = TerrainTexture::from_color_map(&colors, 2, 2);
        assert_eq!(texture.pixels.len(), 16);
        assert_eq!(texture.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(texture.pixel(1, 1), [128, 128, 128, 255]);
    }

    #[test]
    fn test_short_color_map_padded() {
        let texture = TerrainTexture::from_color_map(&[[1.0, 1.0, 1.0]], 2, 1);
        assert_eq!(texture.pixel(1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_map_data_texture_drops_border_ring() {
        // 4x4 с границей: внутренние клетки (1,1), (2,1), (1,2), (2,2) белые
        let values: Vec<f32> = (0..16)
            .map(|i| if (1..3).contains(&(i % 4)) && (1..3).contains(&(i / 4)) { 1.0 } else { 0.0 })
            .collect();
        let color_map = values.iter().map(|&v| [v, v, v]).collect();
        let data = MapData { height_map: HeightMap::from_values(4, 4, values), color_map };

        let texture = TerrainTexture::from_map_data(&data);
        assert_eq!((texture.width, texture.height), (2, 2));
        assert!(texture.pixels.chunks_exact(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_map_data_too_small_gives_empty_texture() {
        let data = MapData { height_map: HeightMap::from_values(2, 2, vec![0.5; 4]), color_map: vec![[0.5; 3]; 4] };
        let texture = TerrainTexture::from_map_data(&data);
        assert_eq!((texture.width, texture.height), (0, 0));
        assert!(texture.pixels.is_empty());
    }

    #[test]
    fn test_height_map_grayscale() {
        let map = HeightMap::from_values(2, 1, vec![0.0, 1.0]);
        let texture = TerrainTexture::from_height_map(&map);
        assert_eq!(texture.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(texture.pixel(1, 0), [255, 255, 255, 255]);
    }
}
