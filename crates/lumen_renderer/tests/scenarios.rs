//! End-to-end rendering scenarios.

use lumen_core::{csg, presets, primitives, Color, Material, RenderConfig, SamplingMode, Sdf, SurfaceSample};
use lumen_renderer::{radiance, render, render_parallel, sample, Ray, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lamp(p: Vec2) -> SurfaceSample {
    SurfaceSample::new(
        primitives::circle(p, Vec2::new(0.5, 0.5), 0.1),
        Material::gray_emitter(1.0),
    )
}

/// Glass slab between the origin and a small light on the right.
fn slab_scene(eta: f32) -> impl Sdf {
    move |p: Vec2| {
        let glass = SurfaceSample::new(
            primitives::rect(p, Vec2::new(0.5, 0.5), 0.0, Vec2::new(0.1, 0.3)),
            Material::dielectric(eta),
        );
        let light = SurfaceSample::new(
            primitives::circle(p, Vec2::new(0.9, 0.5), 0.05),
            Material::gray_emitter(1.0),
        );
        csg::union(glass, light)
    }
}

fn variance(values: &[f32]) -> f32 {
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
}

#[test]
fn single_light_inside_and_far_away() {
    let config = RenderConfig::default().with_samples(16);
    let mut rng = StdRng::seed_from_u64(0);

    for samples in [1, 3, 16] {
        let config = config.clone().with_samples(samples);
        let inside = sample(&lamp, Vec2::new(0.5, 0.5), &config, &mut rng);
        assert!((inside - Color::ONE).length() < 1e-4, "{} samples: {}", samples, inside);
    }

    let far = sample(&lamp, Vec2::new(10.0, 10.0), &config, &mut rng);
    assert_eq!(far, Color::ZERO);
}

#[test]
fn interior_points_see_the_whole_light() {
    let config = RenderConfig::default().with_samples(32);
    for point in [Vec2::new(0.55, 0.5), Vec2::new(0.5, 0.44), Vec2::new(0.47, 0.53)] {
        let c = sample(&lamp, point, &config, &mut StdRng::seed_from_u64(3));
        assert!((c - Color::ONE).length() < 1e-4, "{:?}: {}", point, c);
    }
}

#[test]
fn boundary_point_rounding_outward_sees_half_the_light() {
    // |(0.6, 0.5) - (0.5, 0.5)| - 0.1 rounds to +2.2e-8 in f32
    let point = Vec2::new(0.6, 0.5);
    assert!(lamp(point).sd > 0.0);

    let config = RenderConfig::default()
        .with_samples(64)
        .with_sampling(SamplingMode::Stratified);
    let c = sample(&lamp, point, &config, &mut StdRng::seed_from_u64(0));
    assert!(c.x > 0.45 && c.x < 0.55, "got {}", c);

    // Just inside, nearly every direction reaches the boundary
    let inside = sample(&lamp, Vec2::new(0.6 - 1e-4, 0.5), &config, &mut StdRng::seed_from_u64(0));
    assert!(inside.x > c.x);
}

#[test]
fn two_lights_seen_in_opposite_directions() {
    let scene = |p: Vec2| {
        let left = SurfaceSample::new(
            primitives::circle(p, Vec2::new(0.2, 0.5), 0.1),
            Material::emitter(Color::new(1.0, 0.0, 0.0)),
        );
        let right = SurfaceSample::new(
            primitives::circle(p, Vec2::new(0.8, 0.5), 0.1),
            Material::emitter(Color::new(0.0, 0.0, 2.0)),
        );
        csg::union(left, right)
    };
    let config = RenderConfig::default();
    let origin = Vec2::new(0.5, 0.5);

    let toward_left = radiance(&scene, &Ray::new(origin, -Vec2::X), 0, &config);
    let toward_right = radiance(&scene, &Ray::new(origin, Vec2::X), 0, &config);
    assert!((toward_left - Color::new(1.0, 0.0, 0.0)).length() < 1e-5);
    assert!((toward_right - Color::new(0.0, 0.0, 2.0)).length() < 1e-5);
}

#[test]
fn light_through_a_glass_slab() {
    let config = RenderConfig::default();
    let ray = Ray::new(Vec2::new(0.1, 0.5), Vec2::X);

    // Two faces at normal incidence, each passing 1 - ((1.5 - 1) / (1.5 + 1))^2
    let glass = radiance(&slab_scene(1.5), &ray, 0, &config);
    assert!((glass.x - 0.96 * 0.96).abs() < 1e-3, "got {}", glass);

    let matched = radiance(&slab_scene(1.0), &ray, 0, &config);
    assert!((matched.x - 1.0).abs() < 1e-3, "got {}", matched);
}

#[test]
fn depth_limit_skips_every_secondary_ray() {
    let config = RenderConfig::default().with_max_depth(0);
    let ray = Ray::new(Vec2::new(0.1, 0.5), Vec2::X);
    assert_eq!(radiance(&slab_scene(1.5), &ray, 0, &config), Color::ZERO);
}

#[test]
fn stratified_sampling_is_deterministic() {
    let config = RenderConfig::default()
        .with_samples(32)
        .with_sampling(SamplingMode::Stratified);
    let point = Vec2::new(0.25, 0.3);

    let first = sample(&lamp, point, &config, &mut StdRng::seed_from_u64(1));
    for seed in 2..6 {
        assert_eq!(first, sample(&lamp, point, &config, &mut StdRng::seed_from_u64(seed)));
    }
}

#[test]
fn more_samples_reduce_variance() {
    let point = Vec2::new(0.2, 0.5);
    let estimates = |samples: u32| -> Vec<f32> {
        let config = RenderConfig::default().with_samples(samples);
        (0..40)
            .map(|seed| sample(&lamp, point, &config, &mut StdRng::seed_from_u64(seed)).x)
            .collect()
    };

    let coarse = variance(&estimates(4));
    let fine = variance(&estimates(64));
    assert!(coarse > 0.0);
    assert!(fine < coarse * 0.5, "coarse {} fine {}", coarse, fine);
}

#[test]
fn presets_render_in_parallel_like_sequentially() {
    init_logging();
    for name in ["basic", "csg_subtract", "reflection", "heart"] {
        let preset = presets::builtin(name).unwrap();
        let file = preset.into_scene_file().unwrap();
        let mut config = file.config.clone().with_resolution(12, 12).with_samples(4);
        config.bucket_size = 5;

        let sequential = render(&file.scene, &config);
        let parallel = render_parallel(&file.scene, &config);
        assert_eq!(sequential, parallel, "{} differs", name);
        assert!(sequential.pixels.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn basic_preset_is_bright_at_the_light() {
    let file = presets::builtin("basic").unwrap().into_scene_file().unwrap();
    let config = file.config.clone().with_resolution(16, 16).with_samples(8);
    let image = render(&file.scene, &config);

    assert!((image.get(8, 8) - Color::splat(2.0)).length() < 1e-4);
    assert!(image.get(0, 0).x < image.get(8, 8).x);
}

#[test]
fn scene_file_renders() {
    init_logging();
    let file = lumen_core::parse_scene_str(include_str!("../../../scenes/prism.json")).unwrap();
    let config = file.config.clone().with_resolution(8, 8).with_samples(4);
    let image = render(&file.scene, &config);
    assert_eq!(image.to_rgb8().len(), 8 * 8 * 3);
}
