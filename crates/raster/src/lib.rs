#![deny(unsafe_code)]
//! CPU rendering for the flower simulation.
//!
//! This crate sits between `flower-core` (which emits line batches through
//! the `LineSink` trait) and anything that wants pixels: the CLI renders
//! frames here and writes them out as PNGs. No GPU is involved; lines are
//! rasterized into an RGBA8 buffer with the same blend modes an
//! interactive build would configure.

pub mod canvas;

#[cfg(feature = "png")]
pub mod snapshot;

pub use canvas::{Blend, LineCanvas};

use flower_core::color::Rgba8;
use flower_core::sim::Flower;

/// Renders one frame of the simulation into `canvas`.
///
/// Clears to black, then composites the layers the way the interactive
/// build does: particles with additive blending so crossing streaks
/// brighten, field ticks and the brush cursor with alpha blending on top.
pub fn render_frame(flower: &Flower, canvas: &mut LineCanvas) {
    canvas.clear(Rgba8::BLACK);
    canvas.set_blend(Blend::Additive);
    flower.draw_particles(canvas);
    canvas.set_blend(Blend::Alpha);
    flower.draw_field(canvas);
    flower.draw_brush(canvas);
}
