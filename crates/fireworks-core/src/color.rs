//! Linear RGB colors, HSL jitter and the launch palette.

use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Returns `(hue, saturation, lightness)`, each in `[0, 1]`.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (min + max) * 0.5;
        if max == min {
            return (0.0, 0.0, lightness);
        }
        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (hue / 6.0, saturation, lightness)
    }

    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(l, l, l);
        }
        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;
        Self::new(
            hue_to_channel(q, p, h + 1.0 / 3.0),
            hue_to_channel(q, p, h),
            hue_to_channel(q, p, h - 1.0 / 3.0),
        )
    }

    /// Shift in HSL space. Hue wraps; saturation and lightness clamp to `[0, 1]`.
    pub fn offset_hsl(self, dh: f32, ds: f32, dl: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h + dh, s + ds, l + dl)
    }
}

fn hue_to_channel(q: f32, p: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        q + (p - q) * 6.0 * t
    } else if t < 0.5 {
        p
    } else if t < 2.0 / 3.0 {
        q + (p - q) * 6.0 * (2.0 / 3.0 - t)
    } else {
        q
    }
}

/// Accent colors rockets are drawn from.
pub const PALETTE: [Color; 6] = [
    Color::new(1.0, 0.27, 0.27), // red
    Color::new(1.0, 0.78, 0.2),  // gold
    Color::new(0.3, 0.85, 1.0),  // cyan
    Color::new(0.62, 0.4, 1.0),  // violet
    Color::new(0.35, 1.0, 0.5),  // green
    Color::new(1.0, 0.45, 0.8),  // pink
];

pub fn random_palette_color(rng: &mut impl RandomSource) -> Color {
    PALETTE[rng.index(PALETTE.len())]
}
