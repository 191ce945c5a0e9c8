//! Surface materials.
//!
//! A material describes how light leaves a region of the scene: what it
//! emits, how much it mirrors, whether it refracts, and how strongly it
//! absorbs light along the way.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color type alias (linear RGB, non-negative, unbounded)
pub type Color = Vec3;

/// Physical parameter out of range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("emissive must be finite and >= 0, got {0}")]
    Emissive(Color),

    #[error("reflectivity must be in [0, 1], got {0}")]
    Reflectivity(f32),

    #[error("eta must be finite and >= 0, got {0}")]
    Eta(f32),

    #[error("absorption must be finite and >= 0, got {0}")]
    Absorption(Color),
}

/// Optical properties attached to a signed distance sample.
///
/// All fields default to zero, which describes a black, non-interacting
/// surface. Scene files may write any color as a single number for gray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Material {
    /// Light emitted by the surface (RGB)
    #[serde(deserialize_with = "color::deserialize")]
    pub emissive: Color,

    /// Fraction of light mirrored at the surface, in [0, 1]
    pub reflectivity: f32,

    /// Refractive index of the medium; 0 means not a dielectric
    pub eta: f32,

    /// Beer-Lambert extinction coefficients per channel
    #[serde(deserialize_with = "color::deserialize")]
    pub absorption: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            emissive: Color::ZERO,
            reflectivity: 0.0,
            eta: 0.0,
            absorption: Color::ZERO,
        }
    }
}

impl Material {
    /// A pure light source.
    pub fn emitter(emissive: Color) -> Self {
        Self {
            emissive,
            ..Default::default()
        }
    }

    /// A gray light source with equal channels.
    pub fn gray_emitter(intensity: f32) -> Self {
        Self::emitter(Color::splat(intensity))
    }

    /// A non-emissive mirror.
    pub fn mirror(reflectivity: f32) -> Self {
        Self {
            reflectivity,
            ..Default::default()
        }
    }

    /// A clear dielectric with refractive index `eta`.
    pub fn dielectric(eta: f32) -> Self {
        Self {
            eta,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_absorption(mut self, absorption: Color) -> Self {
        self.absorption = absorption;
        self
    }

    /// Check if this material mirrors any light.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// Check if this material refracts.
    pub fn is_dielectric(&self) -> bool {
        self.eta > 0.0
    }

    /// Check if hitting this material spawns secondary rays.
    pub fn scatters(&self) -> bool {
        self.is_reflective() || self.is_dielectric()
    }

    /// Check the physical parameter ranges.
    ///
    /// Reports the first violated constraint.
    pub fn check(&self) -> Result<(), MaterialError> {
        if !is_non_negative(self.emissive) {
            return Err(MaterialError::Emissive(self.emissive));
        }
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(MaterialError::Reflectivity(self.reflectivity));
        }
        if !(self.eta.is_finite() && self.eta >= 0.0) {
            return Err(MaterialError::Eta(self.eta));
        }
        if !is_non_negative(self.absorption) {
            return Err(MaterialError::Absorption(self.absorption));
        }
        Ok(())
    }
}

fn is_non_negative(color: Color) -> bool {
    color.is_finite() && color.min_element() >= 0.0
}

/// Colors are written either as `[r, g, b]` or as one gray value.
mod color {
    use super::Color;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Gray(f32),
        Rgb([f32; 3]),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Gray(v) => Color::splat(v),
            Repr::Rgb([r, g, b]) => Color::new(r, g, b),
        })
    }
}
