// ============================================
// LOD Levels - Лестница уровней детализации
// ============================================
//
// Ступени упорядочены по строго возрастающей дальности.
// Порог последней ступени - максимальная дальность видимости.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ступень лестницы: уровень упрощения меша и дальность, до которой он используется
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodLevel {
    pub lod: usize,
    pub visible_distance: f32,
}

impl LodLevel {
    pub const fn new(lod: usize, visible_distance: f32) -> Self {
        Self { lod, visible_distance }
    }

    pub const DEFAULT_LEVELS: [LodLevel; 3] = [
        LodLevel::new(0, 200.0),
        LodLevel::new(1, 300.0),
        LodLevel::new(4, 450.0),
    ];
}

/// Проверенная лестница LOD
#[derive(Clone, Debug, PartialEq)]
pub struct LodLadder {
    levels: Vec<LodLevel>,
}

impl LodLadder {
    pub fn new(levels: Vec<LodLevel>) -> Result<Self, ConfigError> {
        validate_ladder(&levels)?;
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LodLevel> {
        self.levels.get(index)
    }

    pub fn max_view_distance(&self) -> f32 {
        self.levels.last().map_or(0.0, |l| l.visible_distance)
    }

    /// Индекс ступени для дистанции до чанка.
    ///
    /// Первая ступень, чей порог не превышен; за пределами дальности видимости - `None`.
    pub fn select(&self, distance: f32) -> Option<usize> {
        if self.levels.is_empty() || distance > self.max_view_distance() {
            return None;
        }
        let last = self.levels.len() - 1;
        let index = self.levels[..last]
            .iter()
            .position(|level| distance <= level.visible_distance)
            .unwrap_or(last);
        Some(index)
    }
}

impl Default for LodLadder {
    fn default() -> Self {
        Self { levels: LodLevel::DEFAULT_LEVELS.to_vec() }
    }
}

/// Лестница не пуста, дальности положительны и строго возрастают
pub fn validate_ladder(levels: &[LodLevel]) -> Result<(), ConfigError> {
    if levels.is_empty() {
        return Err(ConfigError::EmptyLodLadder);
    }
    let mut previous = 0.0f32;
    for (index, level) in levels.iter().enumerate() {
        if level.visible_distance.is_nan() || level.visible_distance <= previous {
            return Err(ConfigError::LodLadderOrder { index });
        }
        previous = level.visible_distance;
    }
    Ok(())
}
