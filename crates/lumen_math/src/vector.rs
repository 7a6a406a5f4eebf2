use crate::Vec3;
use thiserror::Error;

/// World up axis used to build view bases.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Errors raised by vector helpers.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize zero-length vector ({0}, {1}, {2})")]
    ZeroLength(f64, f64, f64),
}

/// Normalize `v`, failing instead of producing NaN components.
///
/// Use this wherever a direction comes from configuration rather than
/// from the tracer itself.
pub fn normalize_checked(v: Vec3) -> Result<Vec3, MathError> {
    v.try_normalize()
        .ok_or(MathError::ZeroLength(v.x, v.y, v.z))
}
