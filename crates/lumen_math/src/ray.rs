use crate::Vec3;

/// A ray in 3D space with origin, direction and bounce bookkeeping.
///
/// `depth` counts how many surface interactions produced this ray; camera
/// rays start at zero. `inside_medium` is set on rays travelling through the
/// interior of a refracting object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub depth: u32,
    pub inside_medium: bool,
}

impl Ray {
    /// Create a new primary ray (depth 0, outside any medium).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            depth: 0,
            inside_medium: false,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Return a copy of this ray with the given depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Return a copy of this ray flagged as inside (or outside) a medium.
    pub fn with_inside_medium(mut self, inside: bool) -> Self {
        self.inside_medium = inside;
        self
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z)
    }
}
