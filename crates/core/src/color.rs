//! Velocity-direction color mapping for streak and field-tick rendering.
//!
//! [`dir_to_color`] turns a direction vector into a hue via
//! `360 * atan2(x, y) / pi`: the angle is measured from the +y axis, not
//! the conventional x axis, and is deliberately left unwrapped, so half the
//! plane produces negative hues that all resolve to the final HSV sector.
//! Both quirks are part of the visual signature and are preserved exactly.

use glam::Vec2;

/// Saturation below this renders as pure gray (no hue contribution).
const GRAY_SATURATION: f32 = 0.00001;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Quantizes float components in [0, 1] to 8-bit with rounding.
    /// Out-of-range components are clamped. Alpha is 255.
    pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: q(r),
            g: q(g),
            b: q(b),
            a: 255,
        }
    }

    /// Returns this color with the alpha channel replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Converts HSV to RGB float components.
///
/// `h` is in degrees but is *not* wrapped into [0, 360): values outside the
/// five explicit sectors (including all negative hues) fall through to the
/// final sector, matching the mapping the streak palette was tuned against.
/// `s` below a small threshold short-circuits to gray.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s < GRAY_SATURATION {
        return (v, v, v);
    }

    let h = h / 60.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Maps a direction to a color: hue from `360 * atan2(dir.x, dir.y) / pi`,
/// through [`hsv_to_rgb`] with the given saturation and value. Alpha is 255.
pub fn dir_to_color(dir: Vec2, saturation: f32, value: f32) -> Rgba8 {
    let hue = 360.0 * dir.x.atan2(dir.y) / std::f32::consts::PI;
    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    Rgba8::from_rgb_f32(r, g, b)
}
