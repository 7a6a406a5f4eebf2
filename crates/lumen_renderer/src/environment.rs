//! What escaping rays see.

use std::f64::consts::PI;

use lumen_core::{BackgroundDescription, ImageResult, Panorama};
use lumen_math::{Color, Vec3};

/// Background queried when a ray misses every object.
#[derive(Debug, Clone)]
pub enum Environment {
    /// Same color in every direction.
    Sky(Color),
    /// Equirectangular image wrapped around the scene.
    Panorama(Panorama),
}

impl Environment {
    /// Build from a description, loading the panorama image if there is one.
    pub fn from_description(desc: &BackgroundDescription) -> ImageResult<Self> {
        Ok(match desc {
            BackgroundDescription::Sky { color } => Environment::Sky(*color),
            BackgroundDescription::Panorama { path } => {
                Environment::Panorama(Panorama::load(path)?)
            }
        })
    }

    /// Color seen looking along `direction`.
    pub fn sample(&self, direction: Vec3) -> Color {
        match self {
            Environment::Sky(color) => *color,
            Environment::Panorama(image) => {
                let (u, v) = panorama_coordinates(direction, image.width, image.height);
                image.get(u, v)
            }
        }
    }
}

/// Map a direction to integer pixel coordinates on a `width` x `height`
/// equirectangular image.
///
/// Longitude is measured in the XZ plane from +X toward +Z and wrapped into
/// [0, 2 pi). Latitude comes from the vertical component: straight up is
/// row 0, straight down the last row.
pub fn panorama_coordinates(direction: Vec3, width: u32, height: u32) -> (u32, u32) {
    let d = direction.normalize_or_zero();

    let longitude = d.z.atan2(d.x).rem_euclid(2.0 * PI);
    let latitude = d.y.clamp(-1.0, 1.0).asin();

    let u = (longitude / (2.0 * PI) * width as f64) as u32;
    let v = ((0.5 - latitude / PI) * height as f64) as u32;

    (u.min(width.saturating_sub(1)), v.min(height.saturating_sub(1)))
}
