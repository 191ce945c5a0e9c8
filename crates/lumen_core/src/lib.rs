//! Lumen Core - Scene description for 2D signed distance rendering.
//!
//! This crate provides:
//!
//! - **Primitives and CSG**: exact signed distances and the operators
//!   combining them, carrying a [`Material`] with every sample
//! - **Scene graph**: the [`Sdf`] trait and the serializable [`SceneNode`] tree
//! - **Configuration**: [`RenderConfig`] shared by files, presets and the CLI
//! - **Scene files and presets**: JSON loading and the built-in scenes
//!
//! # Example
//!
//! ```
//! use lumen_core::{Geometry, Material, Scene, SceneNode, Sdf};
//! use lumen_core::glam::Vec2;
//!
//! let light = SceneNode::shape(
//!     Geometry::Circle { center: Vec2::new(0.5, 0.5), radius: 0.1 },
//!     Material::gray_emitter(2.0),
//! );
//! let scene = Scene::new("light", light).unwrap();
//! assert!(scene.evaluate(Vec2::new(0.5, 0.5)).sd < 0.0);
//! ```

pub mod config;
pub mod csg;
pub mod loader;
pub mod material;
pub mod presets;
pub mod primitives;
pub mod scene;
pub mod surface;

pub use glam;

// Re-export commonly used types
pub use config::{ConfigError, RenderConfig, RenderMode, SamplingMode};
pub use csg::IntersectRule;
pub use loader::{load_scene_file, parse_scene_str, LoadError, LoadResult, SceneFile};
pub use material::{Color, Material, MaterialError};
pub use presets::Preset;
pub use scene::{Geometry, GeometryError, MirrorAxis, Scene, SceneError, SceneNode, SceneResult, Sdf};
pub use surface::SurfaceSample;
