//! Per-frame input snapshot consumed by the brush.
//!
//! The windowing layer fills one of these each frame; the simulation never
//! talks to a device directly. Wheel position and timestamps are absolute
//! counters, so deltas fall out of comparing consecutive snapshots and a
//! dropped frame cannot lose input.

use glam::Vec2;

/// Input state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Drawable surface size in pixels.
    pub viewport: Vec2,
    /// Pointer position in pixels, same space as `viewport`.
    pub pointer: Vec2,
    /// Primary button held (comb).
    pub primary: bool,
    /// Secondary button held (dampen).
    pub secondary: bool,
    /// Accumulated wheel position, not a per-frame delta.
    pub wheel: i32,
    /// Monotonic timestamp in microseconds.
    pub time_us: u64,
}

impl Default for InputSnapshot {
    /// A unit viewport with the pointer at its center and nothing pressed.
    fn default() -> Self {
        Self {
            viewport: Vec2::ONE,
            pointer: Vec2::splat(0.5),
            primary: false,
            secondary: false,
            wheel: 0,
            time_us: 0,
        }
    }
}
