//! Lumen math types.
//!
//! Double precision vectors come straight from glam; the rest of the
//! renderer talks in terms of the aliases and helpers defined here.

pub use glam::{dvec3, DVec3};

/// Three component vector used for points, directions and normals.
pub type Vec3 = DVec3;

mod color;
mod interval;
mod ray;
mod vector;

pub use color::{Color, MAX_CHANNEL};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{normalize_checked, MathError, WORLD_UP};
