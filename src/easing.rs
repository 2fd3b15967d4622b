//! Easing and interpolation helpers.
//!
//! The easing curve is deliberately left unclamped: once a particle's
//! progress passes `1.0` the weight keeps falling below one and then goes
//! negative, so long-lived particles drift back out of the swarm until a
//! respawn resets them.

use glam::Vec3;

/// Quadratic ease-in-out.
///
/// `2t²` below `0.5`, `-1 + (4 - 2t)t` from there on. Not clamped to `[0, 1]`.
#[inline]
pub fn ease(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Linear interpolation from `a` to `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Per-component [`lerp`]. Not a spherical interpolation.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}
