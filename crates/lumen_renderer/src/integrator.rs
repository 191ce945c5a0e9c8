//! Monte Carlo estimate of the light arriving at a point.
//!
//! Every pixel is an omnidirectional probe: rays leave the point in all
//! directions and their radiance is averaged.

use std::f32::consts::TAU;

use lumen_core::{Color, RenderConfig, SamplingMode, Sdf};
use lumen_math::{Ray, Vec2};
use rand::{Rng, RngCore};

use crate::transport::radiance;

/// Direction angle of sample `i` out of `count`.
fn sample_angle(i: u32, count: u32, sampling: SamplingMode, rng: &mut dyn RngCore) -> f32 {
    match sampling {
        SamplingMode::Jittered => TAU * (i as f32 + rng.gen::<f32>()) / count as f32,
        SamplingMode::Stratified => TAU * i as f32 / count as f32,
        SamplingMode::Uniform => TAU * rng.gen::<f32>(),
    }
}

/// Average radiance arriving at `point` over `config.samples_per_pixel`
/// directions.
///
/// With [`SamplingMode::Stratified`] the result does not depend on `rng`.
pub fn sample(scene: &dyn Sdf, point: Vec2, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    let count = config.samples_per_pixel;
    if count == 0 {
        return Color::ZERO;
    }

    let mut sum = Color::ZERO;
    for i in 0..count {
        let angle = sample_angle(i, count, config.sampling, rng);
        let ray = Ray::from_angle(point, angle);
        sum += radiance(scene, &ray, 0, config);
    }
    sum / count as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{primitives, Material, SurfaceSample};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light(p: Vec2) -> SurfaceSample {
        SurfaceSample::new(
            primitives::circle(p, Vec2::new(0.5, 0.5), 0.1),
            Material::gray_emitter(1.0),
        )
    }

    #[test]
    fn test_sample_angles_cover_buckets() {
        let mut rng = StdRng::seed_from_u64(7);
        let count = 8;
        for i in 0..count {
            let a = sample_angle(i, count, SamplingMode::Jittered, &mut rng);
            let bucket = TAU / count as f32;
            assert!(a >= bucket * i as f32 - 1e-6);
            assert!(a <= bucket * (i + 1) as f32 + 1e-6);
        }
        assert_eq!(sample_angle(2, 8, SamplingMode::Stratified, &mut rng), TAU / 4.0);
    }

    #[test]
    fn test_zero_samples() {
        let config = RenderConfig::default().with_samples(0);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample(&light, Vec2::new(0.2, 0.5), &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_inside_a_light() {
        let config = RenderConfig::default().with_samples(8);
        let mut rng = StdRng::seed_from_u64(1);
        let c = sample(&light, Vec2::new(0.5, 0.5), &config, &mut rng);
        assert!((c - Color::ONE).length() < 1e-4);
    }

    #[test]
    fn test_stratified_ignores_rng() {
        let config = RenderConfig::default()
            .with_samples(16)
            .with_sampling(SamplingMode::Stratified);
        let p = Vec2::new(0.2, 0.4);
        let a = sample(&light, p, &config, &mut StdRng::seed_from_u64(1));
        let b = sample(&light, p, &config, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
        assert!(a.x > 0.0 && a.x < 1.0);
    }

    #[test]
    fn test_uniform_sampling_is_seeded() {
        let config = RenderConfig::default()
            .with_samples(16)
            .with_sampling(SamplingMode::Uniform);
        let p = Vec2::new(0.2, 0.4);
        let a = sample(&light, p, &config, &mut StdRng::seed_from_u64(5));
        let b = sample(&light, p, &config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
