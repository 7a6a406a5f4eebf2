//! Pinhole camera for ray generation.
//!
//! The screen lives in pixel units: one pixel step along the image is one
//! world unit along the screen basis, and the screen plane sits
//! `(height / 2) / tan(fov)` units in front of the eye.

use lumen_core::CameraDescription;
use lumen_math::{normalize_checked, MathError, Ray, Vec3, WORLD_UP};
use rand::RngCore;
use thiserror::Error;

use crate::gen_f64;

/// Errors raised while building a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("degenerate camera basis: {0}")]
    Basis(#[from] MathError),

    #[error("field of view must be in (0, 90) degrees, got {0}")]
    FieldOfView(f64),

    #[error("image must be at least 1x2 pixels, got {0}x{1}")]
    ImageSize(u32, u32),
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    image_width: u32,
    image_height: u32,

    // Camera positioning
    eye: Vec3,
    look_at: Vec3,
    fov: f64,

    // Derived screen basis (set by initialize())
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    screen_origin: Vec3,
}

impl Camera {
    /// Create a camera and derive its screen basis.
    ///
    /// `look_at` is a viewing direction, not a target point.
    pub fn new(
        eye: Vec3,
        look_at: Vec3,
        fov: f64,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, CameraError> {
        // The screen distance comes from the whole-pixel half height
        if image_width == 0 || image_height < 2 {
            return Err(CameraError::ImageSize(image_width, image_height));
        }

        let mut camera = Self {
            image_width,
            image_height,
            eye,
            look_at,
            fov,
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
            screen_origin: Vec3::ZERO,
        };
        camera.initialize()?;
        Ok(camera)
    }

    /// Build from a scene description at the given resolution.
    pub fn from_description(
        desc: &CameraDescription,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, CameraError> {
        Self::new(desc.eye, desc.look_at, desc.fov, image_width, image_height)
    }

    /// Move the camera and recompute the basis.
    pub fn set_pose(&mut self, eye: Vec3, look_at: Vec3, fov: f64) -> Result<(), CameraError> {
        self.eye = eye;
        self.look_at = look_at;
        self.fov = fov;
        self.initialize()
    }

    fn initialize(&mut self) -> Result<(), CameraError> {
        if !(self.fov > 0.0 && self.fov < 90.0) {
            return Err(CameraError::FieldOfView(self.fov));
        }

        // Whole-pixel halves: odd sizes put the view axis on pixel (w/2, h/2)
        let half_width = (self.image_width / 2) as f64;
        let half_height = (self.image_height / 2) as f64;

        let view = normalize_checked(self.look_at)?;
        let depth = half_height / self.fov.to_radians().tan();
        let screen_center = self.eye + view * depth;

        // Z points back at the viewer, X and Y span the screen
        let forward = -view;
        let right = -normalize_checked(WORLD_UP.cross(forward))?;
        let up = normalize_checked(forward.cross(right))?;

        self.forward = forward;
        self.right = right;
        self.up = up;
        self.screen_origin = screen_center - up * half_height - right * half_width;
        Ok(())
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// The (right, up, forward) screen basis.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.right, self.up, self.forward)
    }

    /// Ray through a fractional screen position, in pixels from the screen
    /// origin.
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        let target = self.screen_origin + self.right * x + self.up * y;
        Ray::new(self.eye, (target - self.eye).normalize())
    }

    /// Generate a ray for pixel (i, j) jittered by up to half a pixel on
    /// each axis.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_x = gen_f64(rng) - 0.5;
        let offset_y = gen_f64(rng) - 0.5;
        self.ray_through(i as f64 + offset_x, j as f64 + offset_y)
    }
}
