//! Scene file loading.
//!
//! Scene files are JSON documents holding a name, an optional render
//! configuration and the root of a scene graph:
//!
//! ```json
//! {
//!   "name": "lens",
//!   "render": { "samples_per_pixel": 128 },
//!   "root": { "op": "shape", "geometry": { "type": "circle", "center": [0.5, 0.5], "radius": 0.1 },
//!             "material": { "emissive": 2.0 } }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{ConfigError, RenderConfig};
use crate::scene::{Scene, SceneError, SceneNode};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid render settings: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A validated scene together with its render settings.
#[derive(Debug, Clone)]
pub struct SceneFile {
    pub scene: Scene,
    pub config: RenderConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSceneFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    render: RenderConfig,
    root: SceneNode,
}

/// Load and validate a scene file from disk.
///
/// The scene name defaults to the file stem when the file has none.
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> LoadResult<SceneFile> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let file = parse_scene(&text, fallback)?;
    log::info!(
        "Loaded scene '{}' from {} ({} shapes)",
        file.scene.name,
        path.display(),
        file.scene.shape_count()
    );
    Ok(file)
}

/// Parse and validate a scene file from a string.
pub fn parse_scene_str(text: &str) -> LoadResult<SceneFile> {
    parse_scene(text, "unnamed")
}

fn parse_scene(text: &str, fallback_name: &str) -> LoadResult<SceneFile> {
    let raw: RawSceneFile = serde_json::from_str(text)?;
    raw.render.validate()?;
    let name = raw.name.unwrap_or_else(|| fallback_name.to_string());
    let scene = Scene::new(name, raw.root)?;
    Ok(SceneFile {
        scene,
        config: raw.render,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use crate::scene::Sdf;
    use lumen_math::Vec2;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const MINIMAL: &str = r#"{
        "root": { "op": "shape",
                  "geometry": { "type": "circle", "center": [0.5, 0.5], "radius": 0.1 },
                  "material": { "emissive": 2.0 } }
    }"#;

    #[test]
    fn test_parse_minimal() {
        let file = parse_scene_str(MINIMAL).unwrap();
        assert_eq!(file.scene.name, "unnamed");
        assert_eq!(file.config, RenderConfig::default());

        let sample = file.scene.evaluate(Vec2::new(0.5, 0.5));
        assert!((sample.sd + 0.1).abs() < 1e-6);
        assert_eq!(sample.material.emissive, Color::splat(2.0));
    }

    #[test]
    fn test_parse_with_render_settings() {
        let text = r#"{
            "name": "tiny",
            "render": { "width": 16, "height": 8, "max_depth": 5 },
            "root": { "op": "union", "children": [
                { "op": "shape", "geometry": { "type": "circle", "center": [0.3, 0.5], "radius": 0.1 } },
                { "op": "shape", "geometry": { "type": "ngon", "center": [0.7, 0.5], "radius": 0.1, "sides": 5 } }
            ] }
        }"#;
        let file = parse_scene_str(text).unwrap();
        assert_eq!(file.scene.name, "tiny");
        assert_eq!(file.config.width, 16);
        assert_eq!(file.config.max_depth, 5);
        assert_eq!(file.scene.shape_count(), 2);
    }

    #[test]
    fn test_invalid_scene_is_rejected() {
        let text = r#"{ "root": { "op": "union", "children": [] } }"#;
        assert!(matches!(parse_scene_str(text), Err(LoadError::Scene(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let text = r#"{ "render": { "samples_per_pixel": 0 },
                        "root": { "op": "shape", "geometry": { "type": "circle", "center": [0, 0], "radius": 1 } } }"#;
        assert!(matches!(parse_scene_str(text), Err(LoadError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(parse_scene_str("{ nope"), Err(LoadError::Json(_))));
        let unknown_op = r#"{ "root": { "op": "blend" } }"#;
        assert!(matches!(parse_scene_str(unknown_op), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        init_logging();
        let result = load_scene_file("/nonexistent/lumen/scene.json");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_from_disk_uses_file_stem() {
        init_logging();
        let path = std::env::temp_dir().join(format!("lumen_loader_{}.json", std::process::id()));
        std::fs::write(&path, MINIMAL).unwrap();

        let file = load_scene_file(&path).unwrap();
        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert_eq!(file.scene.name, stem);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_bundled_scene_files_parse() {
        for text in [
            include_str!("../../../scenes/lens.json"),
            include_str!("../../../scenes/prism.json"),
        ] {
            let file = parse_scene_str(text).unwrap();
            assert!(file.scene.shape_count() > 0);
        }
    }
}
