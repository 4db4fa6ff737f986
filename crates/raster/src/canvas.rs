//! CPU rasterization of line batches into an RGBA8 pixel buffer.
//!
//! [`LineCanvas`] implements [`LineSink`], so the simulation's draw passes
//! can target it directly. Segments are stepped with a DDA walk, colors
//! interpolated between the endpoints, and pixels blended in either alpha
//! or additive mode. Segments reaching outside the canvas are clipped per
//! pixel; nothing wraps.

use flower_core::color::Rgba8;
use flower_core::draw::{LineSegment, LineSink};
use flower_core::error::Error;
use glam::Vec2;

/// Vertex budget reported to draw passes by a fresh canvas.
pub const DEFAULT_MAX_BATCH_VERTICES: usize = 65_536;

/// How incoming fragments combine with the pixel underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// `dst = lerp(dst, src, src.a)`.
    Alpha,
    /// `dst = dst + src * src.a`, saturating at white.
    Additive,
}

/// An opaque RGBA8 canvas that rasterizes line segments.
///
/// The alpha channel of the buffer stays at 255; segment alpha only weights
/// the blend. This mirrors drawing into an opaque window framebuffer.
pub struct LineCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    blend: Blend,
    max_batch_vertices: usize,
}

impl LineCanvas {
    /// Creates a black canvas of the given size.
    ///
    /// Returns `Error::InvalidDimensions` if either dimension is zero or
    /// the pixel count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(Error::InvalidDimensions)?;
        let mut pixels = vec![0; len];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Ok(Self {
            width,
            height,
            pixels,
            blend: Blend::Alpha,
            max_batch_vertices: DEFAULT_MAX_BATCH_VERTICES,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Canvas size as a vector, for feeding viewport-sized draw passes.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// The raw RGBA8 buffer, row-major, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads one pixel. Panics if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y * self.width + x) * 4;
        Rgba8 {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }

    /// Current blend mode.
    pub fn blend(&self) -> Blend {
        self.blend
    }

    /// Sets the blend mode for subsequent submissions.
    pub fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    /// Overrides the vertex budget reported to draw passes.
    pub fn set_max_batch_vertices(&mut self, max: usize) {
        self.max_batch_vertices = max;
    }

    /// Fills the whole canvas with `color`, alpha forced opaque.
    pub fn clear(&mut self, color: Rgba8) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }

    fn blend_pixel(&mut self, x: isize, y: isize, color: Rgba8) {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = color.a as f32 / 255.0;
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (c, &s) in src.iter().enumerate() {
            let d = self.pixels[idx + c] as f32;
            let out = match self.blend {
                Blend::Alpha => d + (s - d) * a,
                Blend::Additive => (d + s * a).min(255.0),
            };
            self.pixels[idx + c] = out.round() as u8;
        }
    }

    fn rasterize(&mut self, seg: &LineSegment) {
        let delta = seg.end - seg.start;
        if !delta.is_finite() || !seg.start.is_finite() {
            return;
        }
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        // A straight walk is monotone per axis, so skipping consecutive
        // repeats means each covered pixel blends exactly once.
        let mut last = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = seg.start + delta * t;
            let px = (p.x.floor() as isize, p.y.floor() as isize);
            if last == Some(px) {
                continue;
            }
            last = Some(px);
            let color = lerp_color(seg.color_start, seg.color_end, t);
            self.blend_pixel(px.0, px.1, color);
        }
    }
}

impl LineSink for LineCanvas {
    fn max_batch_vertices(&self) -> usize {
        self.max_batch_vertices
    }

    fn submit(&mut self, segments: &[LineSegment]) {
        for seg in segments {
            self.rasterize(seg);
        }
    }
}

/// Componentwise interpolation between two colors, alpha included.
fn lerp_color(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba8 {
        r: mix(a.r, b.r),
        g: mix(a.g, b.g),
        b: mix(a.b, b.b),
        a: mix(a.a, b.a),
    }
}
