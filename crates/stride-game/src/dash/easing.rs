//! Easing curves mapping normalized dash time to normalized progress

use serde::{Deserialize, Serialize};

/// A single `(time, value)` key of an authored curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Shape of a dash's acceleration over its duration.
///
/// Curves are expected to run from 0 to 1 and be non-decreasing, but this is
/// not enforced: an overshooting curve simply carries the actor past the
/// destination and back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "keys")]
pub enum EasingCurve {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic acceleration from rest
    EaseIn,
    /// Quadratic deceleration to rest
    EaseOut,
    /// Smoothstep: accelerate then decelerate
    EaseInOut,
    /// Piecewise-linear through the keys, clamped outside their range
    Keyframes(Vec<CurveKey>),
}

impl EasingCurve {
    /// Evaluate the curve at normalized time `t` (clamped to [0, 1])
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
            Self::Keyframes(keys) => Self::sample_keys(keys, t),
        }
    }

    fn sample_keys(keys: &[CurveKey], t: f32) -> f32 {
        let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
            return t;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        for pair in keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let local = (t - a.time) / span;
                return a.value + (b.value - a.value) * local;
            }
        }
        last.value
    }

    /// Whether the keys are usable: at least two, sorted by time, all finite
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Keyframes(keys) => {
                keys.len() >= 2
                    && keys
                        .iter()
                        .all(|k| k.time.is_finite() && k.value.is_finite())
                    && keys.windows(2).all(|w| w[0].time <= w[1].time)
            }
            _ => true,
        }
    }
}
