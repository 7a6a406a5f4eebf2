//! Lumen Renderer - CPU path tracing of sphere scenes.
//!
//! Camera rays are traced against a linear list of spheres and bounced
//! by diffuse, mirror and dielectric materials until they escape to the
//! environment or run out of depth.

mod camera;
mod environment;
mod material;
mod renderer;
mod scene;
mod sphere;
mod world;

pub use camera::{Camera, CameraError};
pub use environment::{panorama_coordinates, Environment};
pub use material::{random_upper_hemisphere, Material, GLASS_INDEX};
pub use renderer::{
    cast_ray, render, render_image, render_pixel, seeded_rng, RenderError, RenderResult,
};
pub use scene::{HitRecord, Scene, FAR_PLANE, HIT_EPSILON};
pub use sphere::{Intersection, Sphere};
pub use world::World;

/// Re-export math types from lumen_math
pub use lumen_math::{Color, Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}
