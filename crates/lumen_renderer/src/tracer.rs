//! Sphere tracing against a signed distance scene.

use lumen_core::{RenderConfig, Sdf, SurfaceSample};
use lumen_math::{Interval, Ray, Vec2};

/// Limits on a single march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchLimits {
    /// Maximum number of distance evaluations
    pub max_steps: u32,
    /// Ray parameters considered: marching starts at `range.min` and
    /// gives up at `range.max`
    pub range: Interval,
    /// Distance below which the ray counts as touching a surface
    pub epsilon: f32,
}

impl MarchLimits {
    /// Extract the march limits from a render configuration.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            max_steps: config.max_steps,
            range: Interval::new(config.start_offset, config.max_distance),
            epsilon: config.epsilon,
        }
    }
}

/// Record of a ray reaching a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Scene sample at the hit point
    pub sample: SurfaceSample,
    /// Point where the march stopped
    pub point: Vec2,
    /// Ray parameter of the hit, the distance marched from the origin
    pub distance: f32,
    /// +1 if the ray started outside every solid, -1 if inside one
    pub sign: f32,
}

impl SurfaceHit {
    /// Check if the ray travelled inside a solid to reach this hit.
    pub fn from_inside(&self) -> bool {
        self.sign < 0.0
    }
}

/// Which side of the surface the point `origin` is on.
///
/// Points exactly on a boundary count as inside.
#[inline]
pub fn side_of(scene: &dyn Sdf, origin: Vec2) -> f32 {
    if scene.evaluate(origin).is_inside() {
        -1.0
    } else {
        1.0
    }
}

/// March `ray` through `scene` until it touches a surface.
///
/// Rays starting inside a solid march toward its boundary, which is how
/// refracted rays leave a dielectric. Returns `None` when the step budget
/// or the distance range runs out first.
///
/// The side is decided once, at the origin. An origin on a boundary whose
/// distance rounds to a tiny positive value counts as outside, so only the
/// rays heading into the solid find it; a point sampled exactly on a
/// light's edge sees about half of its emission.
pub fn trace_surface(scene: &dyn Sdf, ray: &Ray, limits: &MarchLimits) -> Option<SurfaceHit> {
    let sign = side_of(scene, ray.origin);
    let mut t = limits.range.min;

    for _ in 0..limits.max_steps {
        if t >= limits.range.max {
            break;
        }
        let point = ray.at(t);
        let sample = scene.evaluate(point);
        let step = sample.sd * sign;
        if step < limits.epsilon {
            return Some(SurfaceHit {
                sample,
                point,
                distance: t,
                sign,
            });
        }
        t += step;
    }

    None
}
