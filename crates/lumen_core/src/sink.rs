//! Destinations for rendered pixels.
//!
//! The renderer streams finished pixels into an [`ImageSink`] in row-major
//! order, left to right and then top to bottom. Sinks check that exactly
//! `width * height` pixels arrive before they report success.

use std::path::{Path, PathBuf};

use lumen_math::Color;
use thiserror::Error;

use crate::ppm::{is_ppm_path, PpmWriter};

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("malformed PPM: {0}")]
    Malformed(String),

    #[error("expected {expected} pixels, received {actual}")]
    PixelCount { expected: u64, actual: u64 },

    #[error("pixel written before begin()")]
    NotStarted,
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Something that accepts a stream of pixels.
pub trait ImageSink {
    /// Announce the image dimensions. Called once before any pixel.
    fn begin(&mut self, width: u32, height: u32) -> ImageResult<()>;

    /// Accept the next pixel in row-major order.
    fn write_pixel(&mut self, color: Color) -> ImageResult<()>;

    /// Flush and verify the pixel count.
    fn finish(&mut self) -> ImageResult<()>;
}

/// In-memory image, row-major.
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
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Expected number of pixels for the current dimensions.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to an `image` crate buffer for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.get(x, y).to_array())
        })
    }

    /// Save to disk. `.ppm` goes through the plain-text writer, every
    /// other extension is encoded by the `image` crate.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let path = path.as_ref();

        if is_ppm_path(path) {
            let mut writer = PpmWriter::create(path)?;
            self.write_to(&mut writer)?;
        } else {
            self.to_rgb_image().save(path)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Stream every pixel into another sink.
    pub fn write_to(&self, sink: &mut dyn ImageSink) -> ImageResult<()> {
        sink.begin(self.width, self.height)?;
        for color in &self.pixels {
            sink.write_pixel(*color)?;
        }
        sink.finish()
    }
}

impl Default for ImageBuffer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ImageSink for ImageBuffer {
    fn begin(&mut self, width: u32, height: u32) -> ImageResult<()> {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.reserve(width as usize * height as usize);
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> ImageResult<()> {
        if self.pixels.len() as u64 >= self.pixel_count() {
            return Err(ImageError::PixelCount {
                expected: self.pixel_count(),
                actual: self.pixels.len() as u64 + 1,
            });
        }
        self.pixels.push(color);
        Ok(())
    }

    fn finish(&mut self) -> ImageResult<()> {
        let actual = self.pixels.len() as u64;
        if actual != self.pixel_count() {
            return Err(ImageError::PixelCount {
                expected: self.pixel_count(),
                actual,
            });
        }
        Ok(())
    }
}
