//! Signed distance primitives.
//!
//! Every function maps a query point and shape parameters to a signed
//! distance: negative inside, zero on the boundary, positive outside.
//! Materials are attached by the caller.

use lumen_math::Vec2;
use std::f32::consts::TAU;

/// Distance to a circle.
#[inline]
pub fn circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Distance to a half-plane through `anchor`.
///
/// `normal` must be unit length and points out of the solid side; any
/// other length scales the result.
#[inline]
pub fn plane(p: Vec2, anchor: Vec2, normal: Vec2) -> f32 {
    (p - anchor).dot(normal)
}

/// Unsigned distance to the segment `a -> b`.
///
/// A zero-length segment degenerates to the distance to `a`.
#[inline]
pub fn segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let v = p - a;
    let u = b - a;
    let len2 = u.length_squared();
    if len2 == 0.0 {
        return v.length();
    }
    let t = (v.dot(u) / len2).clamp(0.0, 1.0);
    (v - u * t).length()
}

/// Distance to a capsule: a segment thickened by `radius`.
#[inline]
pub fn capsule(p: Vec2, a: Vec2, b: Vec2, radius: f32) -> f32 {
    segment(p, a, b) - radius
}

/// Distance to a rectangle rotated by `rotation` radians about its center.
pub fn rect(p: Vec2, center: Vec2, rotation: f32, half_extents: Vec2) -> f32 {
    // Rotate the query point into the rectangle's frame
    let local = Vec2::from_angle(-rotation).rotate(p - center);
    let d = local.abs() - half_extents;
    d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
}

/// Distance to a regular polygon with `sides` vertices on a circle of `radius`.
///
/// One vertex sits on the +X axis from `center`. Requires `sides >= 3`.
pub fn ngon(p: Vec2, center: Vec2, radius: f32, sides: u32) -> f32 {
    let local = p - center;
    let wedge = TAU / sides as f32;
    let angle = local.y.atan2(local.x).rem_euclid(wedge);
    let folded = Vec2::from_angle(angle) * local.length();
    plane(folded, Vec2::new(radius, 0.0), Vec2::from_angle(wedge * 0.5))
}

/// Distance to the triangle `a, b, c`.
///
/// The vertices must wind counter-clockwise (positive signed area). With
/// clockwise input every point reports as outside.
pub fn triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let d = segment(p, a, b).min(segment(p, b, c)).min(segment(p, c, a));
    let inside = (b - a).perp_dot(p - a) > 0.0
        && (c - b).perp_dot(p - b) > 0.0
        && (a - c).perp_dot(p - c) > 0.0;
    if inside {
        -d
    } else {
        d
    }
}

/// Round any shape by growing its boundary outward by `radius`.
#[inline]
pub fn rounded(distance: f32, radius: f32) -> f32 {
    distance - radius
}
