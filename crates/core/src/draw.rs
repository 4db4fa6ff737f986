//! Line-list generation for particles, field ticks, and the brush cursor.
//!
//! Drawing is expressed against the [`LineSink`] trait so the simulation
//! core stays free of any graphics API. Every pass respects the sink's
//! vertex budget: segments are submitted in batches of at most
//! `max_batch_vertices / 2`.

use glam::Vec2;

use crate::color::{dir_to_color, Rgba8};
use crate::field::FlowField;
use crate::particles::Particles;

/// Streak length multiplier from per-frame velocity to pixels.
pub const STREAK_SCALE: f32 = 6.0;
/// Saturation for particle streak colors.
pub const STREAK_SATURATION: f32 = 0.2;
/// Value for particle streak colors.
pub const STREAK_VALUE: f32 = 0.3;
/// Alpha at the head of a particle streak; the tail fades to zero.
pub const STREAK_ALPHA: u8 = 115;
/// Alpha at the base of a field tick.
pub const FIELD_TICK_ALPHA: u8 = 100;
/// Segment count of the brush cursor circle.
pub const BRUSH_SEGMENTS: usize = 60;

/// One colored line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub color_start: Rgba8,
    pub color_end: Rgba8,
}

/// Receiver for batched line segments.
///
/// Implementations rasterize, record, or upload the segments; the
/// simulation only promises that each `submit` call stays within
/// `max_batch_vertices` vertices (two per segment).
pub trait LineSink {
    /// Largest vertex count a single `submit` call may carry.
    fn max_batch_vertices(&self) -> usize;

    /// Consumes one batch of segments.
    fn submit(&mut self, segments: &[LineSegment]);
}

/// Submits `segments` to `sink` in batches within its vertex budget.
pub fn submit_batched(sink: &mut dyn LineSink, segments: &[LineSegment]) {
    let per_batch = (sink.max_batch_vertices() / 2).max(1);
    for chunk in segments.chunks(per_batch) {
        sink.submit(chunk);
    }
}

/// Emits one fading streak per particle.
///
/// The streak points opposite to the motion: from the particle's position
/// back along `velocity * viewport * STREAK_SCALE`. Nearly stationary
/// particles (streak shorter than a pixel on both axes) are given a fixed
/// one-pixel upward streak so they stay visible. Head alpha is
/// [`STREAK_ALPHA`], tail alpha zero.
pub fn draw_particles(particles: &Particles, viewport: Vec2, sink: &mut dyn LineSink) {
    let per_batch = (sink.max_batch_vertices() / 2).max(1);
    let mut batch = Vec::with_capacity(per_batch.min(particles.len()));

    for (pos, vel) in particles.positions().iter().zip(particles.velocities()) {
        let head = *pos * viewport;
        let mut dir = *vel * viewport * STREAK_SCALE;
        if dir.x.abs() < 1.0 && dir.y.abs() <= 1.0 {
            dir.y = -1.0;
        }
        // The visibility rule above guarantees |dir| >= 1.
        let color = dir_to_color(dir.normalize(), STREAK_SATURATION, STREAK_VALUE);
        batch.push(LineSegment {
            start: head,
            end: head - dir,
            color_start: color.with_alpha(STREAK_ALPHA),
            color_end: color.with_alpha(0),
        });
        if batch.len() == per_batch {
            sink.submit(&batch);
            batch.clear();
        }
    }
    if !batch.is_empty() {
        sink.submit(&batch);
    }
}

/// Emits one directional tick per non-zero field cell.
///
/// Each tick starts at the cell center and extends along the cell's
/// direction, length `min(2, |v| * 20)` in cell units. Color encodes
/// direction as hue with saturation `|v| * 0.9` and value `min(1, |v| * 5)`,
/// fading from [`FIELD_TICK_ALPHA`] to zero. Zero cells have no direction
/// and draw nothing.
pub fn draw_field(field: &FlowField, viewport: Vec2, sink: &mut dyn LineSink) {
    let cell_size = viewport / Vec2::new(field.width() as f32, field.height() as f32);
    let per_batch = (sink.max_batch_vertices() / 2).max(1);
    let mut batch = Vec::with_capacity(per_batch);

    for (i, &dir) in field.data().iter().enumerate() {
        let len = dir.length();
        if len <= 0.0 {
            continue;
        }
        let x = (i % field.width()) as f32;
        let y = (i / field.width()) as f32;
        let base = (Vec2::new(x, y) + Vec2::splat(0.5)) * cell_size;
        let color = dir_to_color(dir / len, len * 0.9, (len * 5.0).min(1.0));
        let tick_len = (len * 20.0).min(2.0);
        batch.push(LineSegment {
            start: base,
            end: base + (dir / len) * tick_len * cell_size,
            color_start: color.with_alpha(FIELD_TICK_ALPHA),
            color_end: color.with_alpha(0),
        });
        if batch.len() == per_batch {
            sink.submit(&batch);
            batch.clear();
        }
    }
    if !batch.is_empty() {
        sink.submit(&batch);
    }
}

/// Emits the brush cursor: a white circle of [`BRUSH_SEGMENTS`] segments.
///
/// `center` and `radius` are in pixels.
pub fn draw_brush(center: Vec2, radius: f32, sink: &mut dyn LineSink) {
    let mut segments = Vec::with_capacity(BRUSH_SEGMENTS);
    let mut prev = center + Vec2::new(radius, 0.0);
    for i in 1..=BRUSH_SEGMENTS {
        let angle = std::f32::consts::TAU * i as f32 / BRUSH_SEGMENTS as f32;
        let next = center + Vec2::new(angle.cos(), angle.sin()) * radius;
        segments.push(LineSegment {
            start: prev,
            end: next,
            color_start: Rgba8::WHITE,
            color_end: Rgba8::WHITE,
        });
        prev = next;
    }
    submit_batched(sink, &segments);
}
