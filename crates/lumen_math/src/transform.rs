// Point transforms for evaluating distance fields in a warped frame.
//
// These act on the query point, not on the shape: evaluating a field at
// `f(p)` for a rigid `f` keeps it an exact distance. The folds are exact
// only while the folded shape stays inside its fundamental region.

use glam::Vec2;
use std::f32::consts::TAU;

/// Rotate `point` counter-clockwise by `angle` radians about `center`.
#[inline]
pub fn rotate_about(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(point - center)
}

/// Reflect a coordinate onto the upper side of the mirror line `at`.
///
/// `x -> |x - at| + at`, so a shape authored on the `>= at` side appears
/// on both sides.
#[inline]
pub fn mirror(coord: f32, at: f32) -> f32 {
    (coord - at).abs() + at
}

/// Fold `point` into the first of `count` equal angular wedges around `center`.
///
/// The returned point has the same distance from `center` and an angle in
/// `[0, 2π / count)`, so a shape placed in that wedge repeats `count` times.
pub fn polar_fold(point: Vec2, center: Vec2, count: u32) -> Vec2 {
    let local = point - center;
    let wedge = TAU / count as f32;
    let angle = local.y.atan2(local.x).rem_euclid(wedge);
    center + Vec2::from_angle(angle) * local.length()
}
