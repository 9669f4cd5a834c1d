// ============================================
// Noise Functions - Фрактальный шум для карт высот
// ============================================
//
// Поле шума - чистая функция: (размер сетки, параметры) -> карта высот.
// Единственное "состояние" - таблица смещений октав, выводимая из сида.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::height_map::HeightMap;

/// Минимальный масштаб шума (защита от деления на ноль)
pub const MIN_NOISE_SCALE: f32 = 0.0001;

/// Диапазон случайного смещения октавы
const OCTAVE_OFFSET_RANGE: i32 = 100_000;

// 2D hash - значение в диапазоне 0..u32::MAX
#[inline(always)]
fn hash2d(x: i32, y: i32) -> u32 {
    let n = x.wrapping_mul(374761393).wrapping_add(y.wrapping_mul(668265263));
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    (n ^ (n >> 16)) as u32
}

#[inline(always)]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Скалярное произведение псевдослучайного градиента узла на смещение
#[inline(always)]
fn gradient_dot(ix: i32, iy: i32, dx: f32, dy: f32) -> f32 {
    // 8 направлений: оси и диагонали
    match hash2d(ix, iy) & 7 {
        0 => dx + dy,
        1 => -dx + dy,
        2 => dx - dy,
        3 => -dx - dy,
        4 => dx,
        5 => -dx,
        6 => dy,
        _ => -dy,
    }
}

/// 2D градиентный шум (Perlin), результат в диапазоне 0.0..1.0
#[inline]
pub fn perlin2d(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let xi = x0 as i32;
    let yi = y0 as i32;
    let fx = x - x0;
    let fy = y - y0;

    let n00 = gradient_dot(xi, yi, fx, fy);
    let n10 = gradient_dot(xi.wrapping_add(1), yi, fx - 1.0, fy);
    let n01 = gradient_dot(xi, yi.wrapping_add(1), fx, fy - 1.0);
    let n11 = gradient_dot(xi.wrapping_add(1), yi.wrapping_add(1), fx - 1.0, fy - 1.0);

    let u = fade(fx);
    let v = fade(fy);
    let nx0 = n00 + u * (n10 - n00);
    let nx1 = n01 + u * (n11 - n01);
    let value = nx0 + v * (nx1 - nx0);

    (value * 0.5 + 0.5).clamp(0.0, 1.0)
}

/// Режим нормализации карты шума
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// По min/max текущего вызова (швы между чанками)
    Local,
    /// По теоретическому максимуму суммы амплитуд (бесшовно)
    #[default]
    Global,
}

/// Параметры фрактального шума
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub normalize_mode: NormalizeMode,
    pub scale: f32,
    pub octaves: i32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub seed: i32,
    pub offset: [f32; 2],
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            normalize_mode: NormalizeMode::Global,
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 1,
            offset: [0.0, 0.0],
        }
    }
}

impl NoiseParams {
    /// Копия с исправленными значениями вне диапазона
    pub fn sanitized(&self) -> Self {
        Self {
            scale: self.scale.max(MIN_NOISE_SCALE),
            octaves: self.octaves.max(0),
            lacunarity: self.lacunarity.max(1.0),
            ..self.clone()
        }
    }

    /// Сумма амплитуд всех октав (Σ persistence^i)
    pub fn max_possible_height(&self) -> f32 {
        let mut amplitude = 1.0;
        let mut total = 0.0;
        for _ in 0..self.octaves.max(0) {
            total += amplitude;
            amplitude *= self.persistence;
        }
        total
    }
}

/// Смещения октав по сиду. Генерируются строго по возрастанию октавы,
/// поэтому результат не зависит от порядка обхода сетки.
pub fn octave_offsets(seed: i32, octaves: usize) -> Vec<[f32; 2]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    (0..octaves)
        .map(|_| {
            let x = rng.gen_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f32;
            let y = rng.gen_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f32;
            [x, y]
        })
        .collect()
}

/// Сгенерировать карту шума `width x height`.
///
/// `center` - мировое смещение выборки (центр чанка), прибавляется к `params.offset`.
pub fn generate_noise_map(width: usize, height: usize, params: &NoiseParams, center: [f32; 2]) -> HeightMap {
    let params = params.sanitized();
    let octaves = params.octaves as usize;
    let offsets = octave_offsets(params.seed, octaves);
    let offset_x = params.offset[0] + center[0];
    let offset_y = params.offset[1] + center[1];

    let half_width = (width / 2) as f32;
    let half_height = (height / 2) as f32;

    let mut values = vec![0.0f32; width * height];
    let mut min_local = f32::MAX;
    let mut max_local = f32::MIN;

    for y in 0..height {
        for x in 0..width {
            let mut amplitude = 1.0;
            let mut frequency = 1.0;
            let mut noise_height = 0.0;

            for jitter in &offsets {
                // Строки сетки идут в сторону -Z, поэтому Y мирового смещения вычитается
                let sample_x = (x as f32 - half_width + jitter[0] + offset_x) / params.scale * frequency;
                let sample_y = (y as f32 - half_height + jitter[1] - offset_y) / params.scale * frequency;

                let value = perlin2d(sample_x, sample_y) * 2.0 - 1.0;
                noise_height += value * amplitude;

                amplitude *= params.persistence;
                frequency *= params.lacunarity;
            }

            values[y * width + x] = noise_height;
            min_local = min_local.min(noise_height);
            max_local = max_local.max(noise_height);
        }
    }

    match params.normalize_mode {
        NormalizeMode::Local => {
            let range = max_local - min_local;
            for v in values.iter_mut() {
                *v = if range > 0.0 { (*v - min_local) / range } else { 0.0 };
            }
        }
        NormalizeMode::Global => {
            let max_possible = params.max_possible_height();
            for v in values.iter_mut() {
                *v = if max_possible > 0.0 {
                    ((*v + max_possible) / (2.0 * max_possible)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
            }
        }
    }

    HeightMap::from_values(width, height, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: NormalizeMode) -> NoiseParams {
        NoiseParams { normalize_mode: mode, ..NoiseParams::default() }
    }

    #[test]
    fn test_perlin_range() {
        for i in 0..2000 {
            let x = i as f32 * 0.137 - 50.0;
            let y = i as f32 * 0.291 + 12.5;
            let v = perlin2d(x, y);
            assert!((0.0..=1.0).contains(&v), "perlin2d({x}, {y}) = {v}");
        }
    }

    #[test]
    fn test_perlin_is_half_on_lattice() {
        // На узлах решётки градиентный шум равен нулю -> 0.5 после ремапа
        assert_eq!(perlin2d(3.0, -7.0), 0.5);
        assert_eq!(perlin2d(0.0, 0.0), 0.5);
    }

    #[test]
    fn test_octave_offsets_deterministic() {
        let a = octave_offsets(42, 6);
        let b = octave_offsets(42, 6);
        assert_eq!(a, b);
        // Первые октавы не зависят от общего числа октав
        assert_eq!(&octave_offsets(42, 3)[..], &a[..3]);
        assert_ne!(octave_offsets(43, 6), a);
    }

    #[test]
    fn test_noise_map_deterministic() {
        let p = params(NormalizeMode::Global);
        let a = generate_noise_map(24, 24, &p, [100.0, -40.0]);
        let b = generate_noise_map(24, 24, &p, [100.0, -40.0]);
        let bits_a: Vec<u32> = a.values().iter().map(|v| v.to_bits()).collect();
        let bits_b: Vec<u32> = b.values().iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_global_mode_bounded() {
        for seed in [0, 1, 7, -3, 99999] {
            for persistence in [0.1, 0.5, 0.9] {
                let p = NoiseParams { seed, persistence, octaves: 6, ..params(NormalizeMode::Global) };
                let map = generate_noise_map(32, 32, &p, [seed as f32 * 10.0, 5.0]);
                assert!(map.values().iter().all(|v| (0.0..=1.0).contains(v)));
            }
        }
    }

    #[test]
    fn test_local_mode_exact_bounds() {
        let p = params(NormalizeMode::Local);
        let map = generate_noise_map(40, 30, &p, [0.0, 0.0]);
        assert_eq!(map.min(), 0.0);
        assert_eq!(map.max(), 1.0);
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let p = NoiseParams { octaves: -5, ..params(NormalizeMode::Global) };
        let map = generate_noise_map(8, 8, &p, [0.0, 0.0]);
        assert!(map.values().iter().all(|&v| v == 0.0));

        let p = NoiseParams { octaves: 0, ..params(NormalizeMode::Local) };
        let map = generate_noise_map(8, 8, &p, [0.0, 0.0]);
        assert!(map.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_non_positive_scale_is_clamped() {
        let p = NoiseParams { scale: -3.0, ..params(NormalizeMode::Global) };
        let map = generate_noise_map(8, 8, &p, [0.0, 0.0]);
        assert!(map.values().iter().all(|v| v.is_finite()));
        assert_eq!(p.sanitized().scale, MIN_NOISE_SCALE);
    }

    #[test]
    fn test_global_mode_seamless_between_neighbours() {
        // Соседние окна, сдвинутые на целое число клеток, совпадают на перекрытии
        let p = params(NormalizeMode::Global);
        let a = generate_noise_map(16, 16, &p, [0.0, 0.0]);
        let b = generate_noise_map(16, 16, &p, [8.0, 0.0]);
        for y in 0..16 {
            for x in 8..16 {
                assert_eq!(a.get(x, y), b.get(x - 8, y));
            }
        }
    }
}
