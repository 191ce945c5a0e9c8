//! Constructive solid geometry on surface samples.
//!
//! Combinators select between exact distances, so a tree built from
//! exact primitives stays a valid sphere-tracing bound. Only `union` is
//! commutative; every other operator depends on operand order.

use serde::{Deserialize, Serialize};

use crate::surface::SurfaceSample;

/// Which operand supplies the material of an intersection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectRule {
    /// Material of the operand whose distance bounds the result
    #[default]
    Bounding,
    /// Material of the operand nearer to its own surface
    Nearest,
}

/// Union: the nearer surface wins, material included. Ties go to `b`.
#[inline]
pub fn union(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    if a.sd < b.sd {
        a
    } else {
        b
    }
}

/// Intersection: the farther surface bounds the region and supplies the material.
#[inline]
pub fn intersect(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    if a.sd > b.sd {
        a
    } else {
        b
    }
}

/// Intersection keeping the material of the nearer operand.
#[inline]
pub fn intersect_nearest(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    let material = if a.sd > b.sd { b.material } else { a.material };
    SurfaceSample::new(a.sd.max(b.sd), material)
}

/// Intersection with an explicit material rule.
#[inline]
pub fn intersect_with(rule: IntersectRule, a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    match rule {
        IntersectRule::Bounding => intersect(a, b),
        IntersectRule::Nearest => intersect_nearest(a, b),
    }
}

/// Subtraction `a - b`. The material always comes from `a`.
#[inline]
pub fn subtract(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    SurfaceSample::new(a.sd.max(-b.sd), a.material)
}

/// Complement: swaps inside and outside.
///
/// The material is passed through unchanged; a complemented region has
/// no natural material of its own, so combine it before relying on one.
#[inline]
pub fn complement(a: SurfaceSample) -> SurfaceSample {
    SurfaceSample::new(-a.sd, a.material)
}
