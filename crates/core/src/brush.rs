//! Brush state machine turning raw input into field operations.
//!
//! The brush tracks pointer position in normalized coordinates, resizes on
//! wheel motion, and hides itself after a second without activity. Each
//! [`Brush::update`] emits at most one [`BrushAction`] for the frame: comb
//! wins over dampen when both buttons are down and the pointer moved.

use glam::Vec2;

use crate::input::InputSnapshot;

/// Smallest brush radius, in normalized viewport units.
pub const MIN_RADIUS: f32 = 0.01;
/// Largest brush radius.
pub const MAX_RADIUS: f32 = 0.5;
/// Radius a fresh brush starts with.
pub const DEFAULT_RADIUS: f32 = 0.1;
/// Radius change per wheel count.
pub const WHEEL_RADIUS_STEP: f32 = 0.0001;
/// Microseconds of inactivity before the brush cursor hides.
pub const IDLE_TIMEOUT_US: u64 = 1_000_000;

/// Field operation requested by the brush for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushAction {
    /// Comb the field along the stroke from `from` to `to`.
    Comb { from: Vec2, to: Vec2, radius: f32 },
    /// Dampen the field around `center`.
    Dampen { center: Vec2, radius: f32 },
}

/// Pointer-driven brush over the unit square.
#[derive(Debug, Clone)]
pub struct Brush {
    pos: Vec2,
    prev_pos: Vec2,
    radius: f32,
    wheel: i32,
    last_activity_us: u64,
    visible: bool,
}

impl Brush {
    /// A brush at the viewport center with the default radius.
    pub fn new() -> Self {
        Self {
            pos: Vec2::splat(0.5),
            prev_pos: Vec2::splat(0.5),
            radius: DEFAULT_RADIUS,
            wheel: 0,
            last_activity_us: 0,
            visible: true,
        }
    }

    /// Current pointer position in normalized coordinates.
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Pointer position from the previous frame.
    pub fn previous_position(&self) -> Vec2 {
        self.prev_pos
    }

    /// Current radius in normalized viewport units.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius, clamped to `[MIN_RADIUS, MAX_RADIUS]`.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Whether the brush cursor should be drawn this frame.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Folds one input snapshot into the brush and returns the field
    /// operation it requests, if any.
    ///
    /// Order matters within the frame: position and radius update first,
    /// so a comb emitted this frame already uses the wheel-adjusted radius.
    /// "Moved" covers pointer motion and wheel motion alike; both reset the
    /// idle clock, as does any held button.
    pub fn update(&mut self, input: &InputSnapshot) -> Option<BrushAction> {
        self.prev_pos = self.pos;
        self.pos = input.pointer / input.viewport;

        let wheel_delta = input.wheel - self.wheel;
        self.wheel = input.wheel;
        if wheel_delta != 0 {
            self.set_radius(self.radius + WHEEL_RADIUS_STEP * wheel_delta as f32);
        }

        let moved = self.pos != self.prev_pos || wheel_delta != 0;
        if moved || input.primary || input.secondary {
            self.last_activity_us = input.time_us;
        }
        self.visible =
            input.time_us.saturating_sub(self.last_activity_us) < IDLE_TIMEOUT_US;

        if input.primary && moved {
            Some(BrushAction::Comb {
                from: self.prev_pos,
                to: self.pos,
                radius: self.radius,
            })
        } else if input.secondary {
            Some(BrushAction::Dampen {
                center: self.pos,
                radius: self.radius,
            })
        } else {
            None
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new()
    }
}
