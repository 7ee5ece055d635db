// extensions/easing.rs
//
// Pure easing functions for tween interpolation.
// No dependencies on Entity/Scene, just math.

use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start (quarter cosine).
    EaseIn,
    /// Slow end (quarter sine).
    EaseOut,
}

impl Easing {
    /// Map normalized progress `t` to eased progress.
    ///
    /// Values outside [0, 1] extrapolate through the same formula; callers
    /// clamp duration-derived progress themselves.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::EaseOut => (t * FRAC_PI_2).sin(),
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}
