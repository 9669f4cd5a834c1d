// ============================================
// Height Curve - Кривая высоты для меша
// ============================================
//
// Переводит нормализованную высоту (0..1) в форму рельефа.
// Кривая неизменяемая и Send + Sync - вычисляется прямо в рабочих потоках.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeightCurve {
    /// f(t) = t
    #[default]
    Linear,
    /// f(t) = t^exponent (низины сглаживаются, пики остаются)
    Power { exponent: f32 },
    /// Кусочно-линейная кривая по точкам `[t, value]`, отсортированным по t
    Keyframes { points: Vec<[f32; 2]> },
}

impl HeightCurve {
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            HeightCurve::Linear => t,
            HeightCurve::Power { exponent } => t.max(0.0).powf(*exponent),
            HeightCurve::Keyframes { points } => evaluate_keyframes(points, t),
        }
    }
}

fn evaluate_keyframes(points: &[[f32; 2]], t: f32) -> f32 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return t,
    };
    if t <= first[0] {
        return first[1];
    }
    if t >= last[0] {
        return last[1];
    }

    for pair in points.windows(2) {
        let [t0, v0] = pair[0];
        let [t1, v1] = pair[1];
        if t >= t0 && t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * (t - t0) / span;
        }
    }
    last[1]
}
