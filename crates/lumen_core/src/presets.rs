//! Built-in scenes.
//!
//! Each preset pairs a scene graph with the render settings it was tuned
//! for. Several of them depend on the exact march limits (the `basic`
//! preset's short step budget produces its soft halo, for example), so the
//! settings travel with the scene.

use std::f32::consts::TAU;

use lumen_math::Vec2;

use crate::config::RenderConfig;
use crate::csg::IntersectRule;
use crate::loader::SceneFile;
use crate::material::{Color, Material};
use crate::scene::{Geometry, MirrorAxis, Scene, SceneNode, SceneResult};

/// A named built-in scene with its tuned render settings.
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub root: SceneNode,
    pub config: RenderConfig,
}

impl Preset {
    /// Validate the scene graph and pair it with the preset settings.
    pub fn into_scene_file(self) -> SceneResult<SceneFile> {
        let scene = Scene::new(self.name, self.root)?;
        Ok(SceneFile {
            scene,
            config: self.config,
        })
    }
}

type Builder = fn() -> Preset;

const PRESETS: &[(&str, Builder)] = &[
    ("basic", basic),
    ("csg", csg_union),
    ("csg_intersect", csg_intersect),
    ("csg_subtract", csg_subtract),
    ("shapes", shapes),
    ("m", m),
    ("reflection", reflection),
    ("refraction", refraction),
    ("beerlambert", beer_lambert),
    ("heart", heart),
];

/// Names of all built-in presets.
pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}

/// Look up a built-in preset by name.
pub fn builtin(name: &str) -> Option<Preset> {
    PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, build)| build())
}

fn circle(center: (f32, f32), radius: f32, material: Material) -> SceneNode {
    SceneNode::shape(
        Geometry::Circle {
            center: Vec2::new(center.0, center.1),
            radius,
        },
        material,
    )
}

fn capsule(a: (f32, f32), b: (f32, f32), radius: f32, material: Material) -> SceneNode {
    SceneNode::shape(
        Geometry::Capsule {
            a: Vec2::new(a.0, a.1),
            b: Vec2::new(b.0, b.1),
            radius,
        },
        material,
    )
}

fn plane(anchor: (f32, f32), normal: (f32, f32), material: Material) -> SceneNode {
    SceneNode::shape(
        Geometry::Plane {
            anchor: Vec2::new(anchor.0, anchor.1),
            normal: Vec2::new(normal.0, normal.1),
        },
        material,
    )
}

fn ngon(center: (f32, f32), radius: f32, sides: u32, material: Material) -> SceneNode {
    SceneNode::shape(
        Geometry::Ngon {
            center: Vec2::new(center.0, center.1),
            radius,
            sides,
        },
        material,
    )
}

/// Emission-only settings: no bounces, marching from the origin itself.
fn emission_only(samples: u32, max_steps: u32) -> RenderConfig {
    RenderConfig::default()
        .with_samples(samples)
        .with_march(max_steps, 2.0, 0.0)
        .with_max_depth(0)
}

fn basic() -> Preset {
    Preset {
        name: "basic",
        description: "A single glowing circle",
        root: circle((0.5, 0.5), 0.1, Material::gray_emitter(2.0)),
        config: emission_only(64, 10),
    }
}

fn two_lights() -> (SceneNode, SceneNode) {
    (
        circle((0.4, 0.5), 0.2, Material::gray_emitter(1.0)),
        circle((0.6, 0.5), 0.2, Material::gray_emitter(0.8)),
    )
}

fn csg_config() -> RenderConfig {
    emission_only(64, 64).with_march(64, 2.0, 1e-3)
}

fn csg_union() -> Preset {
    let (a, b) = two_lights();
    Preset {
        name: "csg",
        description: "Union of two overlapping lights",
        root: SceneNode::union(vec![a, b]),
        config: csg_config(),
    }
}

fn csg_intersect() -> Preset {
    let (a, b) = two_lights();
    Preset {
        name: "csg_intersect",
        description: "Lens-shaped intersection keeping the nearer light's color",
        root: SceneNode::intersect_with(a, b, IntersectRule::Nearest),
        config: csg_config(),
    }
}

fn csg_subtract() -> Preset {
    let (a, b) = two_lights();
    Preset {
        name: "csg_subtract",
        description: "Crescent left after subtracting one light from the other",
        root: SceneNode::subtract(a, b),
        config: csg_config(),
    }
}

fn shapes() -> Preset {
    Preset {
        name: "shapes",
        description: "Half disc cut from a circle by a plane",
        root: SceneNode::intersect(
            circle((0.5, 0.5), 0.2, Material::gray_emitter(1.0)),
            plane((0.0, 0.5), (0.0, 1.0), Material::gray_emitter(0.8)),
        ),
        config: emission_only(64, 64),
    }
}

fn m() -> Preset {
    let light = Material::gray_emitter(1.0);
    Preset {
        name: "m",
        description: "The letter M drawn with mirrored capsules",
        root: SceneNode::union(vec![
            capsule((0.75, 0.25), (0.75, 0.75), 0.05, light),
            capsule((0.75, 0.25), (0.5, 0.75), 0.05, light),
        ])
        .mirrored(MirrorAxis::X, 0.5),
        config: emission_only(256, 64).with_resolution(1024, 1024),
    }
}

fn reflection() -> Preset {
    let mirror = Material::mirror(0.9);
    Preset {
        name: "reflection",
        description: "A light above a mirrored bowl",
        root: SceneNode::union(vec![
            circle((0.4, 0.2), 0.1, Material::gray_emitter(2.0)),
            SceneNode::subtract(
                plane((0.0, 0.5), (0.0, -1.0), mirror),
                circle((0.5, 0.5), 0.4, mirror),
            ),
        ]),
        config: RenderConfig::default()
            .with_samples(64)
            .with_march(64, 5.0, 0.0),
    }
}

fn refraction() -> Preset {
    let glass = Material::dielectric(1.5).with_reflectivity(0.2);
    let corner_light = circle((1.05, 1.05), 0.05, Material::gray_emitter(5.0));
    Preset {
        name: "refraction",
        description: "A glass M lit from the four corners",
        root: SceneNode::union(vec![
            capsule((0.75, 0.25), (0.75, 0.75), 0.05, glass),
            capsule((0.75, 0.25), (0.5, 0.75), 0.05, glass),
            corner_light.mirrored(MirrorAxis::Y, 0.5),
        ])
        .mirrored(MirrorAxis::X, 0.5),
        config: RenderConfig::default()
            .with_resolution(1024, 1024)
            .with_samples(256)
            .with_max_depth(5),
    }
}

fn beer_lambert() -> Preset {
    Preset {
        name: "beerlambert",
        description: "An absorbing glass slab lit from off screen",
        root: SceneNode::union(vec![
            circle((-0.2, -0.2), 0.1, Material::gray_emitter(10.0)),
            SceneNode::shape(
                Geometry::Rect {
                    center: Vec2::new(0.5, 0.5),
                    rotation: 0.0,
                    half_extents: Vec2::new(0.3, 0.2),
                },
                Material::dielectric(1.5)
                    .with_reflectivity(0.2)
                    .with_absorption(Color::splat(4.0)),
            ),
        ]),
        config: RenderConfig::default().with_samples(256),
    }
}

fn heart() -> Preset {
    let glass = Material::dielectric(1.77).with_absorption(Color::new(0.0, 3.0, 3.0));
    let body = SceneNode::union(vec![
        ngon((0.7, 0.35), 0.2, 16, glass),
        SceneNode::intersect(
            ngon((0.35, 0.35), 0.55, 32, glass),
            plane((0.5, 0.35), (0.0, -1.0), glass),
        ),
    ])
    .mirrored(MirrorAxis::X, 0.5);

    // One light per wedge, placed inside the first of sixteen
    let offset = Vec2::new(0.6 * (TAU / 32.0).cos(), 0.5 * (TAU / 32.0).sin());
    let lights = SceneNode::shape(
        Geometry::Circle {
            center: Vec2::new(0.5, 0.5) + offset,
            radius: 0.05,
        },
        Material::gray_emitter(2.0),
    )
    .polar_repeat(Vec2::new(0.5, 0.5), 16);

    Preset {
        name: "heart",
        description: "A tinted glass heart inside a ring of lights",
        root: SceneNode::union(vec![body, lights]),
        config: RenderConfig::default()
            .with_resolution(1024, 1024)
            .with_samples(256),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Sdf;

    #[test]
    fn test_every_preset_validates() {
        for name in names() {
            let preset = builtin(name).unwrap();
            assert_eq!(preset.name, name);
            assert!(preset.config.validate().is_ok(), "{} config invalid", name);
            let file = preset.into_scene_file().unwrap();
            assert!(file.scene.shape_count() > 0);
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(builtin("teapot").is_none());
    }

    #[test]
    fn test_m_is_symmetric() {
        let file = builtin("m").unwrap().into_scene_file().unwrap();
        let left = file.scene.evaluate(Vec2::new(0.25, 0.5));
        let right = file.scene.evaluate(Vec2::new(0.75, 0.5));
        assert!((left.sd - right.sd).abs() < 1e-6);
        assert!(right.sd < 0.0);
    }

    #[test]
    fn test_heart_lights_repeat() {
        let file = builtin("heart").unwrap().into_scene_file().unwrap();
        let center = Vec2::new(0.5, 0.5);
        let first = center + Vec2::new(0.6 * (TAU / 32.0).cos(), 0.5 * (TAU / 32.0).sin());
        let rotated = lumen_math::rotate_about(first, center, TAU / 16.0 * 5.0);

        for p in [first, rotated] {
            let sample = file.scene.evaluate(p);
            assert!(sample.sd < 0.0);
            assert_eq!(sample.material.emissive, Color::splat(2.0));
        }
    }

    #[test]
    fn test_csg_intersect_uses_nearer_material() {
        let file = builtin("csg_intersect").unwrap().into_scene_file().unwrap();
        // Left edge of the lens: the right circle bounds it, the left one is nearer
        let sample = file.scene.evaluate(Vec2::new(0.4, 0.5));
        assert!(sample.sd.abs() < 1e-5);
        assert_eq!(sample.material.emissive, Color::splat(1.0));
    }
}
