//! Surface scattering.
//!
//! Every material turns one incoming ray into exactly one outgoing ray and
//! attenuates whatever color comes back along it.

use lumen_core::{MaterialDescription, MaterialKind};
use lumen_math::{Color, Ray, Vec3};
use rand::RngCore;
use std::f64::consts::PI;

use crate::{gen_f64, HitRecord};

/// Index of refraction of every dielectric, relative to the surrounding air.
pub const GLASS_INDEX: f64 = 1.5;

/// Per-object material: tint, scalar attenuation and scattering kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    color: Color,
    albedo: f64,
    kind: MaterialKind,
}

impl Material {
    pub fn new(color: Color, albedo: f64, kind: MaterialKind) -> Self {
        Self { color, albedo, kind }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn albedo(&self) -> f64 {
        self.albedo
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Produce the single outgoing ray for a hit.
    ///
    /// The returned ray starts at the hit point with depth 0; the caller
    /// advances the depth.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Ray {
        match self.kind {
            MaterialKind::Diffuse => {
                let direction = rec.normal + random_upper_hemisphere(rng);
                Ray::new(rec.point, direction)
            }
            MaterialKind::Mirror => {
                let incident = -ray_in.direction().normalize();
                Ray::new(rec.point, reflect(incident, rec.normal))
            }
            MaterialKind::Dielectric => refract_through(ray_in, rec),
        }
    }

    /// Weight the color returned by the scattered ray: scalar albedo first,
    /// then the channel-wise tint.
    pub fn attenuate(&self, incoming: Color) -> Color {
        incoming * self.albedo * self.color
    }
}

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        Self::new(desc.color, desc.albedo, desc.kind)
    }
}

/// Mirror `incident` about `normal`.
///
/// `incident` points back toward where the ray came from:
/// `R = -I + N * 2 (N . I)`.
#[inline]
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    -incident + normal * (2.0 * normal.dot(incident))
}

/// Bend a ray across a dielectric boundary.
///
/// The side is taken from the incoming ray's `inside_medium` flag.
/// Entering uses a relative index of `1 / GLASS_INDEX`, leaving uses
/// `GLASS_INDEX`, and the normal is flipped to face the incoming ray when
/// leaving. Past the critical angle the ray is reflected instead.
fn refract_through(ray_in: &Ray, rec: &HitRecord) -> Ray {
    let inside = ray_in.inside_medium;
    let (normal, eta) = if inside {
        (-rec.normal, GLASS_INDEX)
    } else {
        (rec.normal, 1.0 / GLASS_INDEX)
    };

    let unit_direction = ray_in.direction().normalize();
    let cos_i = -unit_direction.dot(normal);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);

    if k < 0.0 {
        // Total internal reflection: stay on the same side
        let reflected = reflect(-unit_direction, normal);
        return Ray::new(rec.point, reflected).with_inside_medium(inside);
    }

    let transmitted = unit_direction * eta + normal * (eta * cos_i - k.sqrt());
    Ray::new(rec.point, transmitted).with_inside_medium(!inside)
}

/// Sample the `z >= 0` half of the unit sphere, cosine weighted about +Z.
///
/// With `theta` uniform in [0, 2 pi) and `u` uniform in [0, 1):
/// `(sqrt(1 - u) cos theta, sqrt(1 - u) sin theta, sqrt(u))`. The lobe is
/// fixed in world space rather than aligned to the surface normal.
pub fn random_upper_hemisphere(rng: &mut dyn RngCore) -> Vec3 {
    let theta = gen_f64(rng) * 2.0 * PI;
    let u = gen_f64(rng);
    let a = (1.0 - u).sqrt();
    Vec3::new(a * theta.cos(), a * theta.sin(), u.sqrt())
}
