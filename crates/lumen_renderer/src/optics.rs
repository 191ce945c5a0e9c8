//! Reflection, refraction and absorption helpers.

use lumen_core::Color;
use lumen_math::Vec2;

/// Reflect a vector about a normal.
///
/// `n` must be unit length; the result then has the length of `v`.
#[inline]
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `eta`.
///
/// `eta` is the ratio of the incident to the transmitted refractive index.
/// The normal may face either side of the surface. Returns `None` on total
/// internal reflection.
#[inline]
pub fn refract(v: Vec2, n: Vec2, eta: f32) -> Option<Vec2> {
    let cos = v.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos * cos);
    if k < 0.0 {
        return None;
    }
    // Pick the root that keeps the transmitted ray on the far side
    let a = if cos > 0.0 {
        eta * cos - k.sqrt()
    } else {
        eta * cos + k.sqrt()
    };
    Some(eta * v - a * n)
}

/// Unpolarized Fresnel reflectance at a dielectric boundary.
///
/// Average of the s- and p-polarized reflectances for light going from a
/// medium of index `eta_i` into one of index `eta_t`.
#[inline]
pub fn fresnel(cos_i: f32, cos_t: f32, eta_i: f32, eta_t: f32) -> f32 {
    let rs = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let rp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    (rs * rs + rp * rp) * 0.5
}

/// Beer-Lambert transmittance over `distance` for per-channel extinction.
#[inline]
pub fn beer_lambert(absorption: Color, distance: f32) -> Color {
    Color::new(
        (-absorption.x * distance).exp(),
        (-absorption.y * distance).exp(),
        (-absorption.z * distance).exp(),
    )
}
