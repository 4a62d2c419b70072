//! 2D vector helpers
//!
//! `glam::Vec2` supplies the component-wise `+ - * /` (scalar and vector
//! operands) and structural equality. These are the derived operations the
//! collision code is written in terms of.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Length of a vector
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    (v.x.powi(2) + v.y.powi(2)).sqrt()
}

/// Unit vector in the direction of `v`, or zero for the exact zero vector
#[inline]
pub fn unit(v: Vec2) -> Vec2 {
    if v == Vec2::ZERO {
        return Vec2::ZERO;
    }
    v / magnitude(v)
}

/// Direction from `b` to `a` in radians: `atan2(a.y - b.y, a.x - b.x)`
#[inline]
pub fn angle(a: Vec2, b: Vec2) -> f32 {
    (a.y - b.y).atan2(a.x - b.x)
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Reflect `v` about a unit normal `n`: v' = v - 2(n·v)n
#[inline]
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * 2.0 * dot(n, v)
}
