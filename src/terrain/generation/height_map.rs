// ============================================
// Height Map - Сетка высот чанка
// ============================================

use serde::{Deserialize, Serialize};

/// 2D сетка высот (row-major, `y * width + x`) и наблюдаемый диапазон значений.
/// После создания не изменяется.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct HeightMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
    min: f32,
    max: f32,
}

impl HeightMap {
    /// Создать карту из готовых значений, диапазон считается сразу
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        let (min, max) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            values
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };
        Self { width, height, values, min, max }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Минимальная высота в карте
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Максимальная высота в карте
    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Новая карта с применённой функцией к каждой клетке
    pub fn map_cells<F>(&self, mut f: F) -> HeightMap
    where
        F: FnMut(usize, usize, f32) -> f32,
    {
        let mut values = Vec::with_capacity(self.values.len());
        for y in 0..self.height {
            for x in 0..self.width {
                values.push(f(x, y, self.get(x, y)));
            }
        }
        HeightMap::from_values(self.width, self.height, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_tracked() {
        let map = HeightMap::from_values(2, 2, vec![0.3, -1.0, 2.5, 0.0]);
        assert_eq!(map.min(), -1.0);
        assert_eq!(map.max(), 2.5);
        assert_eq!(map.get(0, 1), 2.5);
    }

    #[test]
    fn test_empty_map() {
        let map = HeightMap::from_values(0, 0, Vec::new());
        assert!(map.is_empty());
        assert_eq!((map.min(), map.max()), (0.0, 0.0));
    }

    #[test]
    fn test_map_cells_recomputes_range() {
        let map = HeightMap::from_values(3, 1, vec![0.2, 0.4, 0.6]);
        let shifted = map.map_cells(|x, _, v| v - x as f32 * 0.1);
        assert!((shifted.max() - 0.4).abs() < 1e-6);
        assert!((shifted.min() - 0.2).abs() < 1e-6);
    }
}
