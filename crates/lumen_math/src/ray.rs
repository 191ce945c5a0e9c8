use crate::Vec2;

/// A ray in the scene plane with an origin and a direction.
///
/// Rays cast by the renderer always carry a unit direction, so the ray
/// parameter `t` is a distance in scene units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Create a ray leaving `origin` at `angle` radians from the +X axis.
    pub fn from_angle(origin: Vec2, angle: f32) -> Self {
        Self::new(origin, Vec2::from_angle(angle))
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}
