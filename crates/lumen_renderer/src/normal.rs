//! Surface normals from the distance field.

use lumen_core::{Color, Sdf};
use lumen_math::{Interval, Vec2};

/// Central-difference gradient of the distance field at `p`.
///
/// The result is not normalized. For an exact distance field its length
/// is close to one away from medial axes.
pub fn gradient(scene: &dyn Sdf, p: Vec2, epsilon: f32) -> Vec2 {
    let dx = Vec2::new(epsilon, 0.0);
    let dy = Vec2::new(0.0, epsilon);
    let scale = 0.5 / epsilon;
    Vec2::new(
        (scene.distance(p + dx) - scene.distance(p - dx)) * scale,
        (scene.distance(p + dy) - scene.distance(p - dy)) * scale,
    )
}

/// Unit normal at `p`, facing the medium the ray travelled through.
///
/// `sign` is the tracer's side of the surface: +1 keeps the outward
/// gradient, -1 flips it for rays inside a solid. Returns `None` where
/// the gradient vanishes or is not finite, such as on a medial axis.
pub fn oriented_normal(scene: &dyn Sdf, p: Vec2, sign: f32, epsilon: f32) -> Option<Vec2> {
    (gradient(scene, p, epsilon) * sign).try_normalize()
}

/// Debug color for the field gradient at `p`.
///
/// Each gradient component is clamped to [-1, 1] and mapped to [0, 1] in
/// the red and green channels; blue stays zero.
pub fn normal_color(scene: &dyn Sdf, p: Vec2, epsilon: f32) -> Color {
    let g = gradient(scene, p, epsilon);
    let map = |v: f32| Interval::new(-1.0, 1.0).clamp(v) * 0.5 + 0.5;
    Color::new(map(g.x), map(g.y), 0.0)
}
