//! Sphere primitive for ray tracing.

use lumen_math::{Interval, Ray, Vec3};

use crate::Material;

/// Both roots of a ray-sphere quadratic, near root first.
///
/// Returned by value so concurrent rays never share scratch state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t_near: f64,
    pub t_far: f64,
}

impl Intersection {
    /// Pick the root to use within `ray_t`.
    ///
    /// The near root wins when it lies inside the range. Otherwise the far
    /// root is tried; landing on it means the ray started inside the sphere,
    /// which is reported by the returned flag.
    pub fn select(&self, ray_t: Interval) -> Option<(f64, bool)> {
        if ray_t.surrounds(self.t_near) {
            Some((self.t_near, false))
        } else if ray_t.surrounds(self.t_far) {
            Some((self.t_far, true))
        } else {
            None
        }
    }
}

/// A sphere with its own material.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Solve `a t^2 + 2 b t + c = 0` for the ray.
    ///
    /// Returns `None` when the discriminant is not positive (miss or
    /// grazing contact) or the ray direction has zero length.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        if a <= 0.0 {
            return None;
        }

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(Intersection {
            t_near: (-b - sqrtd) / a,
            t_far: (-b + sqrtd) / a,
        })
    }

    /// Nearest usable hit parameter in `ray_t`, plus whether the ray is
    /// leaving the sphere from inside.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f64, bool)> {
        self.intersect(ray)?.select(ray_t)
    }

    /// Outward unit normal at a surface point.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
