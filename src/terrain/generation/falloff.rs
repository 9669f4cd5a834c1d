// ============================================
// Falloff Map - Радиальное затухание для островов
// ============================================

use super::height_map::HeightMap;

/// Крутизна кривой затухания
const FALLOFF_A: f32 = 3.0;
/// Сдвиг кривой затухания
const FALLOFF_B: f32 = 2.2;

/// Кривая `v^a / (v^a + (b - b*v)^a)`: 0 в центре, 1 на краях
#[inline]
fn evaluate(value: f32) -> f32 {
    let va = value.powf(FALLOFF_A);
    va / (va + (FALLOFF_B - FALLOFF_B * value).powf(FALLOFF_A))
}

/// Карта затухания `size x size`, значения в 0.0..=1.0.
/// Не зависит от шума, поэтому её можно один раз посчитать и переиспользовать.
pub fn generate_falloff_map(size: usize) -> HeightMap {
    let mut values = Vec::with_capacity(size * size);
    let denom = size.max(1) as f32;
    for j in 0..size {
        for i in 0..size {
            let x = i as f32 / denom * 2.0 - 1.0;
            let y = j as f32 / denom * 2.0 - 1.0;
            let value = x.abs().max(y.abs());
            values.push(evaluate(value).clamp(0.0, 1.0));
        }
    }
    HeightMap::from_values(size, size, values)
}
