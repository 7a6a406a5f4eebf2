//! Object list and nearest-hit search.

use lumen_math::{Interval, Ray, Vec3};

use crate::{Material, Sphere};

/// Hits closer than this are treated as the surface the ray left from.
pub const HIT_EPSILON: f64 = 0.01;

/// Hits at or beyond this distance are ignored.
pub const FAR_PLANE: f64 = 1000.0;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Index of the object in the scene list
    pub index: usize,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit normal, independent of which side the ray came from
    pub normal: Vec3,
    /// The ray started inside the object (the far root was used)
    pub inside: bool,
}

/// An ordered list of spheres, scanned linearly for every ray.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Sphere) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Sphere] {
        &self.objects
    }

    /// Material of the object a hit refers to.
    pub fn material(&self, rec: &HitRecord) -> &Material {
        self.objects[rec.index].material()
    }

    /// Find the nearest hit in `(HIT_EPSILON, FAR_PLANE)`.
    ///
    /// Ties go to the object listed first.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let mut closest: Option<(usize, f64, bool)> = None;
        let mut ray_t = Interval::new(HIT_EPSILON, FAR_PLANE);

        for (index, object) in self.objects.iter().enumerate() {
            if let Some((t, inside)) = object.hit(ray, ray_t) {
                closest = Some((index, t, inside));
                ray_t = ray_t.with_max(t);
            }
        }

        closest.map(|(index, t, inside)| {
            let point = ray.at(t);
            HitRecord {
                index,
                t,
                point,
                normal: self.objects[index].normal_at(point),
                inside,
            }
        })
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
