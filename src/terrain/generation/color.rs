// ============================================
// Terrain Colors - Цвета по высоте (регионы)
// ============================================
//
// Регионы упорядочены по возрастанию порога высоты.
// Клетка получает цвет ПОСЛЕДНЕГО региона, чей порог она достигла.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Цвет клетки, которая не попала ни в один регион
pub const FALLBACK_COLOR: [f32; 3] = [1.0, 0.0, 1.0];

/// Регион террейна: порог высоты и цвет
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainRegion {
    pub name: String,
    pub height: f32,
    pub color: [f32; 3],
}

impl TerrainRegion {
    pub fn new(name: impl Into<String>, height: f32, color: [f32; 3]) -> Self {
        Self { name: name.into(), height, color }
    }
}

/// Проверенный список регионов (пороги по возрастанию)
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TerrainRegions {
    regions: Vec<TerrainRegion>,
}

impl TerrainRegions {
    /// Создать список, проверив порядок порогов
    pub fn new(regions: Vec<TerrainRegion>) -> Result<Self, ConfigError> {
        validate_region_order(&regions)?;
        Ok(Self { regions })
    }

    /// Регион для высоты (последний, чей порог достигнут)
    pub fn classify(&self, height: f32) -> Option<&TerrainRegion> {
        let mut found = None;
        for region in &self.regions {
            if height >= region.height {
                found = Some(region);
            } else {
                break;
            }
        }
        found
    }

    /// Цвет для высоты, `FALLBACK_COLOR` если регион не найден
    #[inline]
    pub fn color_for(&self, height: f32) -> [f32; 3] {
        self.classify(height).map_or(FALLBACK_COLOR, |r| r.color)
    }

    pub fn as_slice(&self) -> &[TerrainRegion] {
        &self.regions
    }
}

/// Пороги должны идти по возрастанию (равные допустимы)
pub fn validate_region_order(regions: &[TerrainRegion]) -> Result<(), ConfigError> {
    if let Some(index) = regions.iter().position(|r| r.height.is_nan()) {
        return Err(ConfigError::RegionOrder { index, name: regions[index].name.clone() });
    }
    for (index, pair) in regions.windows(2).enumerate() {
        if pair[1].height < pair[0].height {
            return Err(ConfigError::RegionOrder {
                index: index + 1,
                name: pair[1].name.clone(),
            });
        }
    }
    Ok(())
}

/// Набор регионов по умолчанию
pub fn default_regions() -> Vec<TerrainRegion> {
    vec![
        TerrainRegion::new("water", 0.0, [0.21, 0.38, 0.78]),
        TerrainRegion::new("sand", 0.4, [0.82, 0.80, 0.50]),
        TerrainRegion::new("grass", 0.6, [0.34, 0.60, 0.12]),
        TerrainRegion::new("rock", 0.8, [0.45, 0.40, 0.38]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> TerrainRegions {
        TerrainRegions::new(default_regions()).unwrap()
    }

    #[test]
    fn test_classify_last_reached_wins() {
        let regions = regions();
        assert_eq!(regions.classify(0.55).unwrap().name, "sand");
        assert_eq!(regions.classify(0.0).unwrap().name, "water");
        assert_eq!(regions.classify(0.6).unwrap().name, "grass");
        assert_eq!(regions.classify(1.0).unwrap().name, "rock");
    }

    #[test]
    fn test_below_first_threshold_uses_fallback() {
        let regions = regions();
        assert!(regions.classify(-0.1).is_none());
        assert_eq!(regions.color_for(-0.1), FALLBACK_COLOR);
        assert_eq!(TerrainRegions::default().color_for(0.5), FALLBACK_COLOR);
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let single = vec![TerrainRegion::new("water", f32::NAN, [0.0; 3])];
        assert!(matches!(TerrainRegions::new(single), Err(ConfigError::RegionOrder { index: 0, .. })));

        let mut list = default_regions();
        list[0].height = f32::NAN;
        assert!(matches!(TerrainRegions::new(list), Err(ConfigError::RegionOrder { index: 0, .. })));
    }

    #[test]
    fn test_descending_order_rejected() {
        let mut list = default_regions();
        list.reverse();
        match TerrainRegions::new(list) {
            Err(ConfigError::RegionOrder { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
