//! Render configuration.
//!
//! Every knob the renderer reads lives here so presets, scene files and
//! the command line can all produce the same value. Defaults match the
//! reference renders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Color;

/// Recursion depth above which renders get very slow.
const DEEP_RECURSION_WARNING: u32 = 8;

/// Errors in a render configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("background must be a finite non-negative color")]
    Background,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How sample directions are chosen around each pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// One random direction inside each of N equal angular buckets
    #[default]
    Jittered,
    /// The start of each bucket; deterministic
    Stratified,
    /// N independent uniform directions
    Uniform,
}

/// What each pixel of the output shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Monte Carlo estimate of incoming light
    #[default]
    Radiance,
    /// Distance field gradient mapped to red/green, for debugging scenes
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Directions sampled per pixel
    pub samples_per_pixel: u32,
    /// Sphere tracing iterations before a ray counts as a miss
    pub max_steps: u32,
    /// Ray length before a ray counts as a miss
    pub max_distance: f32,
    /// Distance below which the tracer reports a hit
    pub epsilon: f32,
    /// Ray parameter at which marching starts
    pub start_offset: f32,
    /// Offset of secondary ray origins away from the surface
    pub bias: f32,
    /// Finite difference step for surface normals
    pub normal_epsilon: f32,
    /// Maximum number of reflection/refraction bounces
    pub max_depth: u32,
    /// Radiance of rays that escape the scene
    pub background: Color,
    pub sampling: SamplingMode,
    pub mode: RenderMode,
    /// Seed for the per-pixel random streams
    pub seed: u64,
    /// Tile edge length for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            samples_per_pixel: 64,
            max_steps: 64,
            max_distance: 5.0,
            epsilon: 1e-6,
            start_offset: 1e-3,
            bias: 1e-4,
            normal_epsilon: 1e-5,
            max_depth: 3,
            background: Color::ZERO,
            sampling: SamplingMode::Jittered,
            mode: RenderMode::Radiance,
            seed: 0,
            bucket_size: 64,
        }
    }
}

impl RenderConfig {
    /// Set the output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of directions sampled per pixel.
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Set the ray marching limits.
    pub fn with_march(mut self, max_steps: u32, max_distance: f32, start_offset: f32) -> Self {
        self.max_steps = max_steps;
        self.max_distance = max_distance;
        self.start_offset = start_offset;
        self
    }

    /// Set the maximum bounce depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the sampling mode.
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Check that the configuration can drive a render.
    pub fn validate(&self) -> ConfigResult<()> {
        nonzero("width", self.width)?;
        nonzero("height", self.height)?;
        nonzero("samples_per_pixel", self.samples_per_pixel)?;
        nonzero("max_steps", self.max_steps)?;
        nonzero("bucket_size", self.bucket_size)?;
        positive("max_distance", self.max_distance)?;
        positive("epsilon", self.epsilon)?;
        positive("normal_epsilon", self.normal_epsilon)?;
        non_negative("start_offset", self.start_offset)?;
        non_negative("bias", self.bias)?;
        if !(self.background.is_finite() && self.background.min_element() >= 0.0) {
            return Err(ConfigError::Background);
        }
        if self.max_depth > DEEP_RECURSION_WARNING {
            log::warn!(
                "max_depth {} spawns up to 2^{} rays per sample",
                self.max_depth,
                self.max_depth
            );
        }
        Ok(())
    }
}

fn nonzero(name: &'static str, value: u32) -> ConfigResult<()> {
    if value == 0 {
        Err(ConfigError::Zero(name))
    } else {
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
