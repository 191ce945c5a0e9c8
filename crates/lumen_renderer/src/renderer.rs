//! Image rendering.
//!
//! Implements the per-pixel light field render with:
//! - One independent, seeded random stream per pixel
//! - A radiance mode and a normal debug mode
//! - Saturating 8-bit quantization and PNG output

use std::path::Path;

use lumen_core::{Color, RenderConfig, RenderMode, Sdf};
use lumen_math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::integrator::sample;
use crate::normal::normal_color;

/// Spreads neighbouring pixel indices across the seed space.
const PIXEL_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Quantize one channel: scale to 0-255, saturate, round.
///
/// NaN lands on 0.
#[inline]
pub fn quantize(channel: f32) -> u8 {
    (channel * 255.0).clamp(0.0, 255.0).round() as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Random stream for pixel `(x, y)`.
///
/// Depends only on the seed and the pixel, so render order does not
/// change the image.
pub fn pixel_rng(seed: u64, x: u32, y: u32, width: u32) -> StdRng {
    let index = y as u64 * width as u64 + x as u64;
    StdRng::seed_from_u64(seed ^ index.wrapping_add(1).wrapping_mul(PIXEL_SEED_STRIDE))
}

/// Scene point sampled by pixel `(x, y)`.
#[inline]
pub fn pixel_point(x: u32, y: u32, config: &RenderConfig) -> Vec2 {
    Vec2::new(
        x as f32 / config.width as f32,
        y as f32 / config.height as f32,
    )
}

/// Render a single pixel.
pub fn render_pixel(scene: &dyn Sdf, x: u32, y: u32, config: &RenderConfig) -> Color {
    let point = pixel_point(x, y, config);
    match config.mode {
        RenderMode::Radiance => {
            let mut rng = pixel_rng(config.seed, x, y, config.width);
            sample(scene, point, config, &mut rng)
        }
        RenderMode::Normals => normal_color(scene, point, config.normal_epsilon),
    }
}

/// Linear color image produced by a render.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGB bytes, row-major from the top row.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Encode the image as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the entire scene on the calling thread.
pub fn render(scene: &dyn Sdf, config: &RenderConfig) -> ImageBuffer {
    log::info!(
        "Rendering {}x{} @ {} spp (depth {}, {:?})",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        config.mode
    );
    let start = std::time::Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);

    for y in 0..config.height {
        for x in 0..config.width {
            image.set(x, y, render_pixel(scene, x, y, config));
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
