#![deny(unsafe_code)]
//! Simulation core for flower: an interactive vector-field toy.
//!
//! A brush combs momentum into a toroidal 2D velocity field or dampens it
//! back toward rest; a pool of short-lived particles advects through the
//! field and is drawn as fading colored streaks. The crate is pure
//! simulation and geometry: input arrives as [`InputSnapshot`] values and
//! drawing leaves through the [`LineSink`] trait, so any windowing or
//! rasterizing layer can host it.
//!
//! The dynamics are deliberately frame-synchronous — there is no time
//! step, and one [`Flower::update`] call is one frame. All randomness
//! comes from a seeded [`Xorshift64`], so a seed plus an input script
//! reproduces a run bit for bit.

pub mod brush;
pub mod color;
pub mod draw;
pub mod error;
pub mod field;
pub mod input;
pub mod params;
pub mod particles;
pub mod prng;
pub mod sim;

pub use brush::{Brush, BrushAction};
pub use color::{dir_to_color, hsv_to_rgb, Rgba8};
pub use draw::{LineSegment, LineSink};
pub use error::Error;
pub use field::FlowField;
pub use input::InputSnapshot;
pub use particles::Particles;
pub use prng::Xorshift64;
pub use sim::{Flower, FlowerParams, Layers};
