//! Panoramic background images.
//!
//! A panorama is loaded once before rendering and then only read. Lookups
//! take integer pixel coordinates; mapping a direction onto the image is the
//! renderer's job.

use std::path::Path;

use lumen_math::Color;

use crate::ppm::{is_ppm_path, read_ppm_file};
use crate::sink::{ImageBuffer, ImageError, ImageResult};

/// A loaded background image.
#[derive(Clone, Debug)]
pub struct Panorama {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Pixel data, row-major
    pub pixels: Vec<Color>,

    /// Source file path, kept for log messages
    pub path: String,
}

impl Panorama {
    /// Wrap an in-memory image.
    pub fn from_buffer(buffer: ImageBuffer, path: impl Into<String>) -> ImageResult<Self> {
        if buffer.width == 0 || buffer.height == 0 {
            return Err(ImageError::Malformed("panorama has no pixels".to_string()));
        }
        Ok(Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
            path: path.into(),
        })
    }

    /// Load a panorama from disk.
    ///
    /// `.ppm` files go through the plain-text reader; anything else is
    /// decoded by the `image` crate.
    pub fn load(path: impl AsRef<Path>) -> ImageResult<Self> {
        let path = path.as_ref();

        let buffer = if is_ppm_path(path) {
            read_ppm_file(path)?
        } else {
            load_with_image_crate(path)?
        };

        let panorama = Self::from_buffer(buffer, path.to_string_lossy())?;
        log::info!(
            "Loaded panorama: {} ({}x{})",
            panorama.path,
            panorama.width,
            panorama.height
        );
        Ok(panorama)
    }

    /// Pixel at integer coordinates, clamped to the image edges.
    pub fn get(&self, u: u32, v: u32) -> Color {
        let x = u.min(self.width - 1);
        let y = v.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

fn load_with_image_crate(path: &Path) -> ImageResult<ImageBuffer> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| Color::from(p.0)).collect();

    Ok(ImageBuffer {
        width,
        height,
        pixels,
    })
}
