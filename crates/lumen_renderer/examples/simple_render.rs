//! Simple render example.
//!
//! Builds a small glass scene in code and saves it as PNG.

use lumen_core::{Color, Geometry, Material, RenderConfig, Scene, SceneNode};
use lumen_renderer::{render_parallel, Vec2};

fn main() {
    println!("Lumen 2D Renderer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?} ({} shapes)", start.elapsed(), scene.shape_count());

    let config = RenderConfig::default()
        .with_resolution(256, 256)
        .with_samples(64)
        .with_max_depth(4);

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let light = SceneNode::shape(
        Geometry::Circle {
            center: Vec2::new(0.2, 0.25),
            radius: 0.06,
        },
        Material::emitter(Color::new(3.0, 2.6, 2.0)),
    );

    // A lens cut from two overlapping discs
    let glass = Material::dielectric(1.5)
        .with_reflectivity(0.1)
        .with_absorption(Color::new(0.5, 0.2, 0.0));
    let disc = |x: f32| {
        SceneNode::shape(
            Geometry::Circle {
                center: Vec2::new(x, 0.55),
                radius: 0.3,
            },
            glass,
        )
    };
    let lens = SceneNode::intersect(disc(0.35), disc(0.75));

    let floor = SceneNode::shape(
        Geometry::Plane {
            anchor: Vec2::new(0.0, 0.9),
            normal: Vec2::new(0.0, -1.0),
        },
        Material::mirror(0.5),
    );

    Scene::new("simple", SceneNode::union(vec![light, lens, floor])).expect("Invalid scene")
}
