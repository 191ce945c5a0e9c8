//! Lumen - render 2D signed distance scenes from the command line.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_core::presets;
use lumen_core::{load_scene_file, RenderMode, SamplingMode, SceneFile};
use lumen_renderer::{render, render_parallel};

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(version)]
#[command(about = "Render 2D signed distance scenes with sphere traced light transport", long_about = None)]
struct Cli {
    /// Built-in scene to render
    #[arg(short, long, conflicts_with = "scene")]
    preset: Option<String>,

    /// JSON scene file to render
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output PNG file
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Directions sampled per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum reflection/refraction depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long)]
    seed: Option<u64>,

    /// Use evenly spaced directions instead of jittered ones
    #[arg(long)]
    stratified: bool,

    /// Render the distance field gradient instead of light
    #[arg(long)]
    normals: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// List the built-in scenes and exit
    #[arg(long)]
    list: bool,

    /// Log per-bucket progress
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Resolve the scene to render, defaulting to the `basic` preset.
    fn scene_file(&self) -> Result<SceneFile> {
        if let Some(path) = &self.scene {
            return load_scene_file(path)
                .with_context(|| format!("Failed to load scene {}", path.display()));
        }

        let name = self.preset.as_deref().unwrap_or("basic");
        let Some(preset) = presets::builtin(name) else {
            bail!(
                "Unknown preset '{}' (available: {})",
                name,
                presets::names().collect::<Vec<_>>().join(", ")
            );
        };
        preset
            .into_scene_file()
            .with_context(|| format!("Preset '{}' is invalid", name))
    }

    /// Apply command line overrides on top of the scene's settings.
    fn apply_overrides(&self, file: &mut SceneFile) -> Result<()> {
        let config = &mut file.config;
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.stratified {
            config.sampling = SamplingMode::Stratified;
        }
        if self.normals {
            config.mode = RenderMode::Normals;
        }
        log::debug!("Render settings: {:?}", config);
        config.validate().context("Invalid render settings")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if cli.list {
        for name in presets::names() {
            if let Some(preset) = presets::builtin(name) {
                println!("{:<14} {}", name, preset.description);
            }
        }
        return Ok(());
    }

    let mut file = cli.scene_file()?;
    cli.apply_overrides(&mut file)?;
    log::info!(
        "Scene '{}' with {} shapes",
        file.scene.name,
        file.scene.shape_count()
    );

    let image = if cli.sequential {
        render(&file.scene, &file.config)
    } else {
        let mut pool = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = cli.threads {
            pool = pool.num_threads(threads);
        }
        let pool = pool.build().context("Failed to start render threads")?;
        pool.install(|| render_parallel(&file.scene, &file.config))
    };

    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_are_applied_and_validated() {
        let cli = Cli::parse_from(["lumen", "--preset", "csg", "--width", "32", "--stratified"]);
        let mut file = cli.scene_file().unwrap();
        cli.apply_overrides(&mut file).unwrap();
        assert_eq!(file.scene.name, "csg");
        assert_eq!(file.config.width, 32);
        assert_eq!(file.config.sampling, SamplingMode::Stratified);

        let cli = Cli::parse_from(["lumen", "--samples", "0"]);
        let mut file = cli.scene_file().unwrap();
        assert!(cli.apply_overrides(&mut file).is_err());
    }

    #[test]
    fn test_unknown_preset() {
        let cli = Cli::parse_from(["lumen", "--preset", "teapot"]);
        let err = cli.scene_file().unwrap_err();
        assert!(err.to_string().contains("heart"));
    }

    #[test]
    fn test_preset_and_scene_conflict() {
        let result = Cli::try_parse_from(["lumen", "--preset", "basic", "--scene", "x.json"]);
        assert!(result.is_err());
    }
}
