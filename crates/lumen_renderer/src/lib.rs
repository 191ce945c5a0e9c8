//! Lumen Renderer - 2D sphere tracing light transport
//!
//! Renders scenes described by signed distance fields. Every pixel is an
//! omnidirectional probe: rays are marched from it in all directions,
//! reflect and refract off the surfaces they reach, and the radiance they
//! bring back is averaged.

pub mod bucket;
pub mod integrator;
pub mod normal;
pub mod optics;
pub mod renderer;
pub mod tracer;
pub mod transport;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult};
pub use integrator::sample;
pub use normal::{gradient, normal_color, oriented_normal};
pub use optics::{beer_lambert, fresnel, reflect, refract};
pub use renderer::{color_to_rgb, pixel_rng, render, render_pixel, ImageBuffer};
pub use tracer::{trace_surface, MarchLimits, SurfaceHit};
pub use transport::radiance;

/// Re-export the scene types and math used in the renderer's API
pub use lumen_core::{Color, RenderConfig, Sdf};
pub use lumen_math::{Interval, Ray, Vec2};
