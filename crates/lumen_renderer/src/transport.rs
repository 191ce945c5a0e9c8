//! Recursive light transport.
//!
//! A ray collects the emission of the first surface it reaches, then
//! splits into a reflected and a refracted ray weighted by Fresnel
//! reflectance, and is finally attenuated by the absorption of the
//! material it crossed.

use lumen_core::{Color, RenderConfig, Sdf};
use lumen_math::{Interval, Ray};

use crate::normal::oriented_normal;
use crate::optics::{beer_lambert, fresnel, reflect, refract};
use crate::tracer::{trace_surface, MarchLimits};

/// Compute the radiance arriving at the origin of `ray` from its direction.
///
/// `depth` counts the bounces already taken. Once it reaches
/// `config.max_depth` no secondary rays are spawned.
pub fn radiance(scene: &dyn Sdf, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    let limits = MarchLimits::from_config(config);
    let Some(hit) = trace_surface(scene, ray, &limits) else {
        return config.background;
    };

    let material = hit.sample.material;
    let mut sum = material.emissive;

    if depth < config.max_depth && material.scatters() {
        if let Some(n) = oriented_normal(scene, hit.point, hit.sign, config.normal_epsilon) {
            let mut reflectivity = material.reflectivity;

            if material.is_dielectric() {
                let (eta_i, eta_t) = if hit.from_inside() {
                    (material.eta, 1.0)
                } else {
                    (1.0, material.eta)
                };
                match refract(ray.direction, n, eta_i / eta_t) {
                    Some(direction) => {
                        let cos_i = -ray.direction.dot(n);
                        let cos_t = -direction.dot(n);
                        reflectivity =
                            Interval::UNIT.clamp(fresnel(cos_i, cos_t, eta_i, eta_t));
                        let refracted = Ray::new(hit.point - n * config.bias, direction);
                        sum += (1.0 - reflectivity) * radiance(scene, &refracted, depth + 1, config);
                    }
                    // Total internal reflection
                    None => reflectivity = 1.0,
                }
            }

            if reflectivity > 0.0 {
                let reflected = Ray::new(hit.point + n * config.bias, reflect(ray.direction, n));
                sum += reflectivity * radiance(scene, &reflected, depth + 1, config);
            }
        }
    }

    sum * beer_lambert(material.absorption, hit.distance)
}
