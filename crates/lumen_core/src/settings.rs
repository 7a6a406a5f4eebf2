//! Render settings shared by the renderer and the command line front end.

use serde::{Deserialize, Serialize};

use crate::scene::{SceneError, SceneResult};

/// Exponent used when gamma correction is enabled.
pub const DEFAULT_GAMMA: f64 = 2.2;

/// What the integrator computes for each camera ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    /// Recursive light transport through material scattering.
    #[default]
    Path,
    /// Surface normal of the nearest hit mapped to a color; no bounces.
    Normals,
}

/// Image and sampling parameters for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Rays with this many bounces behind them return black
    pub max_depth: u32,
    /// Apply `255 * (c / 255)^(1 / 2.2)` to each averaged pixel
    pub gamma: bool,
    pub shading: Shading,
    /// Fixed seed for reproducible renders; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            samples_per_pixel: 10,
            max_depth: 4,
            gamma: false,
            shading: Shading::Path,
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total number of pixels an image sink receives.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::Invalid(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::Invalid(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
