//! RGB colors for liquids, reaction results and particles

use serde::{Deserialize, Serialize};

/// Linear RGB color with channels in 0.0-255.0
///
/// Channels are kept as floats so repeated blending converges smoothly
/// instead of stalling on integer truncation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);
    pub const SMOKE: Rgb = Rgb::new(200.0, 200.0, 200.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Move this color toward `target` by `fraction` of the remaining distance
    ///
    /// `fraction` is clamped to [0, 1], so the result always lies between
    /// `self` and `target` (no overshoot).
    pub fn blend_toward(self, target: Rgb, fraction: f32) -> Rgb {
        let t = fraction.clamp(0.0, 1.0);
        Rgb {
            r: self.r + (target.r - self.r) * t,
            g: self.g + (target.g - self.g) * t,
            b: self.b + (target.b - self.b) * t,
        }
    }

    /// Squared euclidean distance between two colors
    pub fn distance_sq(self, other: Rgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Quantize to RGBA bytes for render consumers
    pub fn to_rgba8(self, alpha: u8) -> [u8; 4] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
            alpha,
        ]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r as f32, g as f32, b as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_half_way() {
        let c = Rgb::new(100.0, 100.0, 100.0);
        let result = c.blend_toward(Rgb::new(200.0, 220.0, 240.0), 0.5);
        assert_eq!(result, Rgb::new(150.0, 160.0, 170.0));
    }

    #[test]
    fn test_blend_fraction_is_clamped() {
        let c = Rgb::new(0.0, 0.0, 0.0);
        let target = Rgb::new(10.0, 20.0, 30.0);
        assert_eq!(c.blend_toward(target, 2.0), target);
        assert_eq!(c.blend_toward(target, -1.0), c);
    }

    #[test]
    fn test_blend_downward_stays_above_target() {
        let mut c = Rgb::new(250.0, 250.0, 250.0);
        let target = Rgb::new(10.0, 100.0, 240.0);
        for _ in 0..50 {
            c = c.blend_toward(target, 0.18);
            assert!(c.r >= target.r && c.g >= target.g && c.b >= target.b);
        }
    }

    #[test]
    fn test_to_rgba8_rounds_and_clamps() {
        let c = Rgb::new(12.6, -3.0, 300.0);
        assert_eq!(c.to_rgba8(255), [13, 0, 255, 255]);
    }

    #[test]
    fn test_from_u8_tuple() {
        let c: Rgb = (0, 120, 255).into();
        assert_eq!(c, Rgb::new(0.0, 120.0, 255.0));
    }
}
