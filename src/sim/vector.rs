//! 2D vector helpers for steering and gestures
//!
//! Thin layer over `glam::Vec2` that keeps the original length around when
//! normalizing, since steering needs both the direction to a target and
//! the distance to it.

use glam::Vec2;

/// A unit vector together with the length of the vector it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub dir: Vec2,
    pub length: f32,
}

/// Normalize `v`, keeping its original length.
///
/// Returns `None` for zero-length or non-finite input; callers skip
/// whatever decision needed a direction.
#[inline]
pub fn normalize(v: Vec2) -> Option<Unit> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Some(Unit {
            dir: v / length,
            length,
        })
    } else {
        None
    }
}

/// Unit vector pointing along `direction` (radians)
#[inline]
pub fn heading(direction: f32) -> Vec2 {
    let (sin, cos) = direction.sin_cos();
    Vec2::new(cos, sin)
}

/// Signed turn term between a facing angle and a target direction.
///
/// Negative means the target lies on the side reached by increasing
/// `direction`; zero or positive means decreasing it.
#[inline]
pub fn turn_term(direction: f32, target: Vec2) -> f32 {
    let (sin, cos) = direction.sin_cos();
    target.x * sin - target.y * cos
}
