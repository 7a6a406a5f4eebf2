//! Lumen Core - scene description and image input/output.
//!
//! This crate provides:
//!
//! - **Scene description**: plain data for the camera, background and
//!   spheres, loadable from JSON
//! - **Render settings**: resolution, sampling and shading options
//! - **Image sinks**: a plain-text PPM writer and an in-memory buffer
//! - **Panoramas**: background images sampled by integer coordinates
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::SceneDescription;
//!
//! let scene = SceneDescription::load("scene.json")?;
//! println!("Loaded {} spheres", scene.spheres.len());
//! ```

pub mod ppm;
pub mod scene;
pub mod settings;
pub mod sink;
pub mod texture;

// Re-export commonly used types
pub use ppm::{is_ppm_path, read_ppm, PpmWriter};
pub use scene::{
    BackgroundDescription, CameraDescription, MaterialDescription, MaterialKind, SceneDescription,
    SceneError, SceneResult, SphereDescription,
};
pub use settings::{RenderSettings, Shading, DEFAULT_GAMMA};
pub use sink::{ImageBuffer, ImageError, ImageResult, ImageSink};
pub use texture::Panorama;
