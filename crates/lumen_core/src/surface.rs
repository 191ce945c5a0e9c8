//! The result of evaluating a scene at a point.

use crate::material::Material;

/// A signed distance paired with the material of the nearest surface.
///
/// Negative distances are inside a solid region, positive outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Signed distance to the nearest surface
    pub sd: f32,
    /// Material of the region the distance was measured against
    pub material: Material,
}

impl SurfaceSample {
    /// Create a new sample.
    pub fn new(sd: f32, material: Material) -> Self {
        Self { sd, material }
    }

    /// A sample infinitely far from any surface.
    pub fn empty() -> Self {
        Self::new(f32::INFINITY, Material::default())
    }

    /// Check if the sample lies inside a solid region or on its boundary.
    ///
    /// NaN distances count as inside.
    pub fn is_inside(&self) -> bool {
        !(self.sd > 0.0)
    }
}
