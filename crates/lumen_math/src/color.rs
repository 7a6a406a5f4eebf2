//! 8-bit RGB color with saturating arithmetic.
//!
//! Every operator clamps its result into `[0, MAX_CHANNEL]`. Scaling and
//! channel-wise products truncate toward zero, so `c * 1.0 == c` and
//! `c * Color::WHITE == c` hold exactly.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Largest value a channel can hold.
pub const MAX_CHANNEL: u8 = 255;

/// RGB color with integer channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(MAX_CHANNEL, MAX_CHANNEL, MAX_CHANNEL);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wide channel values, clamping each into range.
    pub fn from_clamped(r: i64, g: i64, b: i64) -> Self {
        let clamp = |c: i64| c.clamp(0, MAX_CHANNEL as i64) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    /// Map a direction onto a color: each component in [-1, 1] becomes
    /// a channel in [0, 255]. Used to visualise surface normals.
    pub fn from_direction(v: Vec3) -> Self {
        let v = v.normalize_or_zero();
        let channel = |c: f64| scale_channel(MAX_CHANNEL, (c + 1.0) / 2.0);
        Self::new(channel(v.x), channel(v.y), channel(v.z))
    }

    /// Apply gamma correction: `255 * (c / 255)^(1 / gamma)` per channel.
    pub fn gamma_corrected(self, gamma: f64) -> Self {
        let max = MAX_CHANNEL as f64;
        let correct = |c: u8| scale_channel(MAX_CHANNEL, (c as f64 / max).powf(1.0 / gamma));
        Self::new(correct(self.r), correct(self.g), correct(self.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// `channel * factor`, truncated toward zero and clamped into range.
#[inline]
fn scale_channel(channel: u8, factor: f64) -> u8 {
    (channel as f64 * factor).clamp(0.0, MAX_CHANNEL as f64) as u8
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
        )
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::new(
            self.r.saturating_sub(rhs.r),
            self.g.saturating_sub(rhs.g),
            self.b.saturating_sub(rhs.b),
        )
    }
}

/// Intensity scaling.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, factor: f64) -> Color {
        Color::new(
            scale_channel(self.r, factor),
            scale_channel(self.g, factor),
            scale_channel(self.b, factor),
        )
    }
}

/// Channel-wise tint: `a * b / 255`.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        let tint = |a: u8, b: u8| (a as u16 * b as u16 / MAX_CHANNEL as u16) as u8;
        Color::new(tint(self.r, rhs.r), tint(self.g, rhs.g), tint(self.b, rhs.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_saturates() {
        let c = Color::new(200, 10, 255) + Color::new(100, 20, 1);
        assert_eq!(c, Color::new(255, 30, 255));
    }

    #[test]
    fn test_sub_saturates() {
        let c = Color::new(10, 50, 0) - Color::new(20, 25, 1);
        assert_eq!(c, Color::new(0, 25, 0));
    }

    #[test]
    fn test_scale_truncates_and_clamps() {
        assert_eq!(Color::new(150, 200, 255) * 0.5, Color::new(75, 100, 127));
        assert_eq!(Color::new(200, 200, 200) * 2.0, Color::WHITE);
        assert_eq!(Color::new(200, 200, 200) * -1.0, Color::BLACK);
        assert_eq!(Color::new(1, 2, 3) * f64::NAN, Color::BLACK);
    }

    #[test]
    fn test_tint() {
        let c = Color::new(150, 200, 255) * Color::new(200, 240, 255);
        assert_eq!(c, Color::new(117, 188, 255));
    }

    #[test]
    fn test_attenuation_identity() {
        let c = Color::new(37, 128, 254);
        assert_eq!(c * 1.0 * Color::WHITE, c);
    }

    #[test]
    fn test_gamma_corrected() {
        assert_eq!(Color::BLACK.gamma_corrected(2.2), Color::BLACK);
        assert_eq!(Color::WHITE.gamma_corrected(2.2), Color::WHITE);

        let mid = Color::new(128, 128, 128).gamma_corrected(2.2);
        // 255 * (128/255)^(1/2.2) ~= 186.4
        assert_eq!(mid, Color::new(186, 186, 186));
    }

    #[test]
    fn test_from_direction() {
        assert_eq!(Color::from_direction(Vec3::Z), Color::new(127, 127, 255));
        assert_eq!(Color::from_direction(Vec3::NEG_Y), Color::new(127, 0, 127));
    }

    #[test]
    fn test_from_clamped() {
        assert_eq!(Color::from_clamped(-5, 300, 42), Color::new(0, 255, 42));
    }
}
