//! Scripted brush strokes standing in for a live pointer.
//!
//! Offline rendering has no mouse, so each stroke synthesizes one
//! [`InputSnapshot`] per frame: a pointer path, button state, and a
//! 60 fps clock. Scripts are pure functions of the frame index (plus a
//! seeded noise generator for `wander`), so renders are reproducible.

use flower_core::input::InputSnapshot;
use glam::Vec2;
use noise::{NoiseFn, Perlin};

/// Microseconds per synthesized frame (60 fps).
pub const FRAME_US: u64 = 16_667;

/// Radians the orbit pointer advances per frame.
const ORBIT_STEP: f32 = 0.05;
/// Orbit radius in normalized viewport units.
const ORBIT_RADIUS: f32 = 0.3;
/// Frames for one full out-and-back sweep.
const SWEEP_PERIOD: usize = 240;
/// Noise-time advance per frame for the wander stroke.
const WANDER_RATE: f64 = 0.01;
/// Wander excursion from the center, in normalized viewport units.
const WANDER_SPAN: f32 = 0.4;
/// Frames per scrub cycle: a comb drag followed by a dampen hold.
const SCRUB_CYCLE: usize = 90;
/// Comb frames at the start of each scrub cycle.
const SCRUB_COMB_FRAMES: usize = 60;

const STROKE_NAMES: &[&str] = &["orbit", "sweep", "wander", "scrub"];

/// Available stroke scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Comb in a circle around the viewport center.
    Orbit,
    /// Comb left and right along the horizontal midline.
    Sweep,
    /// Comb along a Perlin-driven meander.
    Wander,
    /// Alternate comb drags with dampen holds at the center.
    Scrub,
}

impl Stroke {
    /// Parses a stroke name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "orbit" => Some(Stroke::Orbit),
            "sweep" => Some(Stroke::Sweep),
            "wander" => Some(Stroke::Wander),
            "scrub" => Some(Stroke::Scrub),
            _ => None,
        }
    }

    /// Returns a slice of all recognized stroke names.
    pub fn list_names() -> &'static [&'static str] {
        STROKE_NAMES
    }
}

/// A stroke bound to a noise seed, ready to produce per-frame input.
pub struct StrokeScript {
    stroke: Stroke,
    noise: Perlin,
}

impl StrokeScript {
    /// Binds `stroke` to a seed. Only `wander` consumes the seed.
    pub fn new(stroke: Stroke, seed: u32) -> Self {
        Self {
            stroke,
            noise: Perlin::new(seed),
        }
    }

    /// Input snapshot for `frame` on a viewport of the given pixel size.
    pub fn input(&self, frame: usize, viewport: Vec2) -> InputSnapshot {
        let (pos, primary, secondary) = match self.stroke {
            Stroke::Orbit => {
                let angle = frame as f32 * ORBIT_STEP;
                let pos = Vec2::splat(0.5)
                    + Vec2::new(angle.cos(), angle.sin()) * ORBIT_RADIUS;
                (pos, true, false)
            }
            Stroke::Sweep => {
                let phase = (frame % SWEEP_PERIOD) as f32 / SWEEP_PERIOD as f32;
                let tri = if phase < 0.5 {
                    phase * 2.0
                } else {
                    2.0 - phase * 2.0
                };
                (Vec2::new(0.15 + 0.7 * tri, 0.5), true, false)
            }
            Stroke::Wander => {
                let t = frame as f64 * WANDER_RATE;
                let nx = self.noise.get([t, 0.0]).clamp(-1.0, 1.0) as f32;
                let ny = self.noise.get([t + 100.0, 100.0]).clamp(-1.0, 1.0) as f32;
                let pos = Vec2::splat(0.5) + Vec2::new(nx, ny) * WANDER_SPAN;
                (pos, true, false)
            }
            Stroke::Scrub => {
                let phase = frame % SCRUB_CYCLE;
                if phase < SCRUB_COMB_FRAMES {
                    let t = phase as f32 / SCRUB_COMB_FRAMES as f32;
                    (Vec2::splat(0.2) + Vec2::splat(0.6) * t, true, false)
                } else {
                    (Vec2::splat(0.5), false, true)
                }
            }
        };

        InputSnapshot {
            viewport,
            pointer: pos * viewport,
            primary,
            secondary,
            wheel: 0,
            time_us: frame as u64 * FRAME_US,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_parses_every_listed_stroke() {
        for name in Stroke::list_names() {
            assert!(
                Stroke::from_name(name).is_some(),
                "listed stroke {name} failed to parse"
            );
        }
    }

    #[test]
    fn from_name_rejects_unknown_names() {
        assert_eq!(Stroke::from_name("spiral"), None);
        assert_eq!(Stroke::from_name(""), None);
        assert_eq!(Stroke::from_name("Orbit"), None);
    }

    #[test]
    fn clock_advances_one_frame_at_a_time() {
        let script = StrokeScript::new(Stroke::Orbit, 1);
        let viewport = Vec2::splat(256.0);
        assert_eq!(script.input(0, viewport).time_us, 0);
        assert_eq!(script.input(1, viewport).time_us, FRAME_US);
        assert_eq!(script.input(5, viewport).time_us, 5 * FRAME_US);
    }

    #[test]
    fn orbit_pointer_circles_the_center() {
        let script = StrokeScript::new(Stroke::Orbit, 1);
        let viewport = Vec2::splat(200.0);
        for frame in 0..200 {
            let input = script.input(frame, viewport);
            assert!(input.primary);
            assert!(!input.secondary);
            let r = (input.pointer / viewport - Vec2::splat(0.5)).length();
            assert!((r - ORBIT_RADIUS).abs() < 1e-4, "frame {frame}: r={r}");
        }
    }

    #[test]
    fn sweep_stays_on_the_midline_within_margins() {
        let script = StrokeScript::new(Stroke::Sweep, 1);
        let viewport = Vec2::splat(100.0);
        for frame in 0..SWEEP_PERIOD * 2 {
            let input = script.input(frame, viewport);
            let pos = input.pointer / viewport;
            assert!((pos.y - 0.5).abs() < 1e-6);
            assert!((0.15..=0.85).contains(&pos.x), "frame {frame}: x={}", pos.x);
        }
    }

    #[test]
    fn sweep_reverses_direction_mid_period() {
        let script = StrokeScript::new(Stroke::Sweep, 1);
        let viewport = Vec2::splat(100.0);
        let early = script.input(10, viewport).pointer.x;
        let later = script.input(20, viewport).pointer.x;
        assert!(later > early, "first half should move right");

        let past_mid = script.input(SWEEP_PERIOD / 2 + 10, viewport).pointer.x;
        let past_mid_later = script.input(SWEEP_PERIOD / 2 + 20, viewport).pointer.x;
        assert!(past_mid_later < past_mid, "second half should move left");
    }

    #[test]
    fn wander_stays_inside_the_viewport() {
        let script = StrokeScript::new(Stroke::Wander, 7);
        let viewport = Vec2::new(640.0, 480.0);
        for frame in 0..500 {
            let pos = script.input(frame, viewport).pointer / viewport;
            assert!((0.099..=0.901).contains(&pos.x), "frame {frame}: {pos:?}");
            assert!((0.099..=0.901).contains(&pos.y), "frame {frame}: {pos:?}");
        }
    }

    #[test]
    fn wander_is_deterministic_per_seed() {
        let viewport = Vec2::splat(512.0);
        let a = StrokeScript::new(Stroke::Wander, 42);
        let b = StrokeScript::new(Stroke::Wander, 42);
        for frame in [0, 17, 250] {
            assert_eq!(a.input(frame, viewport), b.input(frame, viewport));
        }
    }

    #[test]
    fn wander_moves_between_frames() {
        let script = StrokeScript::new(Stroke::Wander, 42);
        let viewport = Vec2::splat(512.0);
        let moved = (1..100)
            .filter(|&f| {
                script.input(f, viewport).pointer != script.input(f - 1, viewport).pointer
            })
            .count();
        assert!(moved > 50, "wander pointer barely moved: {moved}/99 frames");
    }

    #[test]
    fn scrub_alternates_comb_and_dampen() {
        let script = StrokeScript::new(Stroke::Scrub, 1);
        let viewport = Vec2::splat(100.0);

        let comb = script.input(10, viewport);
        assert!(comb.primary);
        assert!(!comb.secondary);

        let dampen = script.input(SCRUB_COMB_FRAMES + 5, viewport);
        assert!(!dampen.primary);
        assert!(dampen.secondary);
        assert_eq!(dampen.pointer / viewport, Vec2::splat(0.5));

        // The next cycle combs again.
        let next_cycle = script.input(SCRUB_CYCLE + 10, viewport);
        assert!(next_cycle.primary);
    }

    #[test]
    fn pointers_scale_with_the_viewport() {
        let script = StrokeScript::new(Stroke::Orbit, 1);
        let small = script.input(3, Vec2::splat(100.0));
        let large = script.input(3, Vec2::splat(1000.0));
        assert!((large.pointer - small.pointer * 10.0).length() < 1e-3);
    }
}
