//! Two-dimensional velocity field combed and dampened by the brush.
//!
//! A `FlowField` stores `width * height` planar velocities (`glam::Vec2`)
//! in row-major layout. [`FlowField::sample`] uses toroidal (wrap-around)
//! addressing, so any normalized coordinate maps to exactly one cell.
//! The two brush operations share the [`footprint_weight`] helper and keep
//! the field bounded: after [`FlowField::comb`] no touched cell exceeds
//! unit magnitude.

use glam::Vec2;

use crate::error::Error;

/// Scale applied to a cell at the exact brush center by one dampen pass.
pub const DAMPEN_SCALE: f32 = 0.8;
/// Strokes at or below this length are ignored by [`FlowField::comb`].
pub const STROKE_MIN_LENGTH: f32 = 0.0001;
/// Exponent shaping how stroke speed translates into comb strength.
pub const STROKE_WEIGHT_EXPONENT: f32 = 1.8;
/// Base comb strength, divided by `4 * radius` so narrow brushes bite harder.
pub const COMB_STRENGTH: f32 = 150.0;

/// Distance fraction of a cell inside the square brush footprint.
///
/// Returns `None` when `cell_pos` lies outside the axis-aligned square of
/// half-width `radius` around `center`, otherwise the per-axis distance
/// fraction's length capped at 1.0: zero at the brush center, rising toward
/// the footprint edge (reaching 1.0 on the inscribed circle and staying
/// there out to the corners). Used identically by dampen and comb.
pub fn footprint_weight(cell_pos: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let abs_delta = (cell_pos - center).abs();
    if abs_delta.x > radius || abs_delta.y > radius {
        return None;
    }
    Some((abs_delta / radius).length().min(1.0))
}

/// A 2D velocity field with toroidal sampling and square-footprint brush
/// operations.
#[derive(Debug, Clone)]
pub struct FlowField {
    width: usize,
    height: usize,
    data: Vec<Vec2>,
}

impl FlowField {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `Error::InvalidDimensions` if either dimension is zero or if
    /// `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions);
        }
        let len = width.checked_mul(height).ok_or(Error::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![Vec2::ZERO; len],
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[Vec2] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Writes here bypass the unit-magnitude bound that comb maintains;
    /// callers manage their own invariants.
    pub fn data_mut(&mut self) -> &mut [Vec2] {
        &mut self.data
    }

    /// Converts signed coordinates to a flat index using toroidal wrapping.
    fn index(&self, x: isize, y: isize) -> usize {
        let xi = x.rem_euclid(self.width as isize) as usize;
        let yi = y.rem_euclid(self.height as isize) as usize;
        yi * self.width + xi
    }

    /// Gets the vector at `(x, y)` with toroidal wrapping.
    pub fn get(&self, x: isize, y: isize) -> Vec2 {
        self.data[self.index(x, y)]
    }

    /// Sets the vector at `(x, y)` with toroidal wrapping.
    pub fn set(&mut self, x: isize, y: isize, v: Vec2) {
        let idx = self.index(x, y);
        self.data[idx] = v;
    }

    /// Samples the cell containing normalized coordinates `uv`.
    ///
    /// Maps to cell `(floor(uv.x * width) mod width, floor(uv.y * height)
    /// mod height)`; coordinates outside [0, 1) wrap via Euclidean modulo.
    /// Defined for the full input domain, with no clamping and no error.
    pub fn sample(&self, uv: Vec2) -> Vec2 {
        let ix = (uv.x * self.width as f32).floor() as isize;
        let iy = (uv.y * self.height as f32).floor() as isize;
        self.data[self.index(ix, iy)]
    }

    /// Decays velocities inside the square brush footprint around `center`.
    ///
    /// Each cell blends from `v * 0.8` toward `v` by its footprint weight:
    /// center cells decay hardest, edge cells barely move. The falloff runs
    /// opposite to the usual soft-brush intuition; the blend is ground truth
    /// and is not renormalized.
    pub fn dampen(&mut self, center: Vec2, radius: f32) {
        let dims = Vec2::new(self.width as f32, self.height as f32);
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Vec2::new(x as f32, y as f32) / dims;
                if let Some(force_len) = footprint_weight(p, center, radius) {
                    let v = &mut self.data[y * self.width + x];
                    *v = (*v * DAMPEN_SCALE).lerp(*v, force_len);
                }
            }
        }
    }

    /// Injects velocity along the brush stroke direction.
    ///
    /// A no-op when the stroke from `prev` to `cur` is at or below
    /// [`STROKE_MIN_LENGTH`]. Otherwise every cell in the square footprint
    /// around `cur` gains `stroke_dir * comb_weight`, strongest at the
    /// brush center and fading to zero at the footprint edge, with
    /// `stroke_len^1.8` scaling for stroke speed and `150 / (4 * radius)`
    /// for brush width. Cells exceeding unit magnitude afterwards are
    /// rescaled to unit length, keeping the field bounded under repeated
    /// combing.
    pub fn comb(&mut self, prev: Vec2, cur: Vec2, radius: f32) {
        let stroke = cur - prev;
        let stroke_len = stroke.length();
        if stroke_len <= STROKE_MIN_LENGTH {
            return;
        }

        let stroke_weight = stroke_len.powf(STROKE_WEIGHT_EXPONENT);
        let stroke_dir = stroke / stroke_len;
        let strength = COMB_STRENGTH / (4.0 * radius);

        let dims = Vec2::new(self.width as f32, self.height as f32);
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Vec2::new(x as f32, y as f32) / dims;
                if let Some(force_len) = footprint_weight(p, cur, radius) {
                    let v = &mut self.data[y * self.width + x];
                    let comb_weight = (1.0 - force_len) * stroke_weight * strength;
                    *v += stroke_dir * comb_weight;

                    let len = v.length();
                    if len > 1.0 {
                        *v /= len;
                    }
                }
            }
        }
    }
}
