//! Top-level simulation: field, particles, and brush under one clock.
//!
//! [`Flower`] owns the whole state and advances it one frame per
//! [`Flower::update`] call. There is no time step: the dynamics are
//! frame-synchronous by construction, so a frame of input maps to exactly
//! one comb or dampen and one particle advection pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::brush::{Brush, BrushAction};
use crate::draw;
use crate::draw::LineSink;
use crate::error::Error;
use crate::field::FlowField;
use crate::input::InputSnapshot;
use crate::params::{param_u64, param_usize};
use crate::particles::Particles;
use crate::prng::Xorshift64;

/// Default field width in cells.
pub const DEFAULT_FIELD_WIDTH: usize = 512;
/// Default field height in cells.
pub const DEFAULT_FIELD_HEIGHT: usize = 512;
/// Default particle pool size.
pub const DEFAULT_PARTICLE_COUNT: usize = 150_000;
/// Default PRNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Construction parameters for a [`Flower`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerParams {
    /// Field width in cells.
    pub field_width: usize,
    /// Field height in cells.
    pub field_height: usize,
    /// Number of streak particles.
    pub particles: usize,
    /// Seed for particle spawning.
    pub seed: u64,
}

impl Default for FlowerParams {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            particles: DEFAULT_PARTICLE_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl FlowerParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            field_width: param_usize(params, "field_width", DEFAULT_FIELD_WIDTH),
            field_height: param_usize(params, "field_height", DEFAULT_FIELD_HEIGHT),
            particles: param_usize(params, "particles", DEFAULT_PARTICLE_COUNT),
            seed: param_u64(params, "seed", DEFAULT_SEED),
        }
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "field_width": self.field_width,
            "field_height": self.field_height,
            "particles": self.particles,
            "seed": self.seed,
        })
    }
}

/// Which layers the draw pass emits.
///
/// The brush layer is additionally gated by [`Brush::visible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub particles: bool,
    pub field: bool,
    pub brush: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            particles: true,
            field: false,
            brush: true,
        }
    }
}

/// The full simulation state.
pub struct Flower {
    field: FlowField,
    particles: Particles,
    brush: Brush,
    rng: Xorshift64,
    layers: Layers,
    viewport: Vec2,
}

impl Flower {
    /// Builds a simulation from `params`.
    ///
    /// Returns `Error::InvalidDimensions` for a degenerate field size.
    pub fn new(params: FlowerParams) -> Result<Self, Error> {
        let field = FlowField::new(params.field_width, params.field_height)?;
        let mut rng = Xorshift64::new(params.seed);
        let particles = Particles::new(params.particles, &mut rng);
        Ok(Self {
            field,
            particles,
            brush: Brush::new(),
            rng,
            layers: Layers::default(),
            viewport: Vec2::ONE,
        })
    }

    /// Builds a simulation from a JSON params object.
    pub fn from_json(params: &Value) -> Result<Self, Error> {
        Self::new(FlowerParams::from_json(params))
    }

    /// Read-only access to the velocity field.
    pub fn field(&self) -> &FlowField {
        &self.field
    }

    /// Mutable access to the velocity field.
    pub fn field_mut(&mut self) -> &mut FlowField {
        &mut self.field
    }

    /// Read-only access to the particle pool.
    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    /// Read-only access to the brush.
    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Mutable access to the brush.
    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    /// Current layer visibility flags.
    pub fn layers(&self) -> Layers {
        self.layers
    }

    /// Mutable access to the layer visibility flags.
    pub fn layers_mut(&mut self) -> &mut Layers {
        &mut self.layers
    }

    /// Viewport recorded by the last update, in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Advances the simulation by one frame.
    ///
    /// The brush folds in the input first and its action, if any, is
    /// applied to the field; particles then advect through the updated
    /// field. A comb therefore influences particles within the same frame.
    pub fn update(&mut self, input: &InputSnapshot) {
        self.viewport = input.viewport;
        match self.brush.update(input) {
            Some(BrushAction::Comb { from, to, radius }) => {
                self.field.comb(from, to, radius);
            }
            Some(BrushAction::Dampen { center, radius }) => {
                self.field.dampen(center, radius);
            }
            None => {}
        }
        self.particles.update(&self.field, &mut self.rng);
    }

    /// Emits the particle layer, honoring the layer flag.
    pub fn draw_particles(&self, sink: &mut dyn LineSink) {
        if self.layers.particles {
            draw::draw_particles(&self.particles, self.viewport, sink);
        }
    }

    /// Emits the field layer, honoring the layer flag.
    pub fn draw_field(&self, sink: &mut dyn LineSink) {
        if self.layers.field {
            draw::draw_field(&self.field, self.viewport, sink);
        }
    }

    /// Emits the brush cursor when its layer is on and the brush is awake.
    ///
    /// The cursor center scales per axis; the radius scales by the
    /// viewport width.
    pub fn draw_brush(&self, sink: &mut dyn LineSink) {
        if self.layers.brush && self.brush.visible() {
            draw::draw_brush(
                self.brush.position() * self.viewport,
                self.brush.radius() * self.viewport.x,
                sink,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::LineSegment;

    fn small_params() -> FlowerParams {
        FlowerParams {
            field_width: 32,
            field_height: 32,
            particles: 64,
            seed: 42,
        }
    }

    fn frame(pointer: Vec2, primary: bool, secondary: bool) -> InputSnapshot {
        InputSnapshot {
            viewport: Vec2::splat(100.0),
            pointer,
            primary,
            secondary,
            ..InputSnapshot::default()
        }
    }

    struct CountingSink {
        segments: Vec<LineSegment>,
    }

    impl CountingSink {
        fn new() -> Self {
            Self {
                segments: Vec::new(),
            }
        }
    }

    impl LineSink for CountingSink {
        fn max_batch_vertices(&self) -> usize {
            1 << 16
        }

        fn submit(&mut self, segments: &[LineSegment]) {
            self.segments.extend_from_slice(segments);
        }
    }

    // -- Construction --

    #[test]
    fn new_builds_field_and_pool_from_params() {
        let flower = Flower::new(small_params()).unwrap();
        assert_eq!(flower.field().width(), 32);
        assert_eq!(flower.field().height(), 32);
        assert_eq!(flower.particles().len(), 64);
        assert_eq!(flower.layers(), Layers::default());
    }

    #[test]
    fn new_rejects_zero_field_dimensions() {
        let params = FlowerParams {
            field_width: 0,
            ..small_params()
        };
        assert!(matches!(Flower::new(params), Err(Error::InvalidDimensions)));
    }

    #[test]
    fn from_json_uses_defaults_for_empty_object() {
        let params = FlowerParams::from_json(&json!({}));
        assert_eq!(params, FlowerParams::default());
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let params = FlowerParams::from_json(&json!({
            "field_width": 64,
            "field_height": 48,
            "particles": 1000,
            "seed": 7,
        }));
        assert_eq!(params.field_width, 64);
        assert_eq!(params.field_height, 48);
        assert_eq!(params.particles, 1000);
        assert_eq!(params.seed, 7);
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = FlowerParams {
            field_width: 100,
            field_height: 50,
            particles: 12,
            seed: 99,
        };
        assert_eq!(FlowerParams::from_json(&params.to_json()), params);
    }

    // -- Update --

    #[test]
    fn drag_with_primary_combs_the_field() {
        let mut flower = Flower::new(small_params()).unwrap();
        // Park the pointer, then drag right across the center.
        flower.update(&frame(Vec2::new(40.0, 50.0), false, false));
        flower.update(&frame(Vec2::new(60.0, 50.0), true, false));

        let v = flower.field().sample(Vec2::new(0.6, 0.5));
        assert!(v.x > 0.0, "expected +x flow near stroke end, got {v:?}");
        assert!(v.x.abs() > v.y.abs(), "not predominantly +x: {v:?}");
    }

    #[test]
    fn secondary_button_dampens_the_field() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&frame(Vec2::new(40.0, 50.0), false, false));
        flower.update(&frame(Vec2::new(60.0, 50.0), true, false));
        let before: f32 = flower.field().data().iter().map(|v| v.length()).sum();
        assert!(before > 0.0);

        for _ in 0..20 {
            flower.update(&frame(Vec2::new(60.0, 50.0), false, true));
        }
        let after: f32 = flower.field().data().iter().map(|v| v.length()).sum();
        assert!(after < before, "dampen left total {after} >= {before}");
    }

    #[test]
    fn idle_frames_leave_the_field_untouched() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&frame(Vec2::new(40.0, 50.0), false, false));
        flower.update(&frame(Vec2::new(60.0, 50.0), true, false));
        let snapshot: Vec<Vec2> = flower.field().data().to_vec();

        flower.update(&frame(Vec2::new(60.0, 50.0), false, false));
        assert_eq!(flower.field().data(), snapshot.as_slice());
    }

    #[test]
    fn update_advances_particles_every_frame() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&frame(Vec2::splat(50.0), false, false));
        // First frame respawns the whole zero-lifetime pool.
        let lifetimes: Vec<u32> = flower.particles().lifetimes().to_vec();
        flower.update(&frame(Vec2::splat(50.0), false, false));
        let after: Vec<u32> = flower.particles().lifetimes().to_vec();
        let changed = lifetimes
            .iter()
            .zip(&after)
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 0, "no particle state advanced");
    }

    #[test]
    fn update_records_the_viewport() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&InputSnapshot {
            viewport: Vec2::new(800.0, 600.0),
            ..InputSnapshot::default()
        });
        assert_eq!(flower.viewport(), Vec2::new(800.0, 600.0));
    }

    // -- Determinism --

    #[test]
    fn same_params_and_input_give_identical_state() {
        let script = [
            frame(Vec2::new(30.0, 30.0), false, false),
            frame(Vec2::new(50.0, 40.0), true, false),
            frame(Vec2::new(70.0, 60.0), true, false),
            frame(Vec2::new(70.0, 60.0), false, true),
        ];
        let mut a = Flower::new(small_params()).unwrap();
        let mut b = Flower::new(small_params()).unwrap();
        for input in &script {
            a.update(input);
            b.update(input);
        }
        let bits = |v: &Vec2| (v.x.to_bits(), v.y.to_bits());
        assert!(a
            .field()
            .data()
            .iter()
            .zip(b.field().data())
            .all(|(va, vb)| bits(va) == bits(vb)));
        assert!(a
            .particles()
            .positions()
            .iter()
            .zip(b.particles().positions())
            .all(|(pa, pb)| bits(pa) == bits(pb)));
    }

    #[test]
    fn different_seeds_spawn_differently() {
        let a = Flower::new(small_params()).unwrap();
        let b = Flower::new(FlowerParams {
            seed: 1234,
            ..small_params()
        })
        .unwrap();
        assert_ne!(a.particles().positions(), b.particles().positions());
    }

    // -- Draw gating --

    #[test]
    fn default_layers_draw_particles_but_not_field() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&frame(Vec2::new(40.0, 50.0), false, false));
        flower.update(&frame(Vec2::new(60.0, 50.0), true, false));

        let mut sink = CountingSink::new();
        flower.draw_particles(&mut sink);
        assert_eq!(sink.segments.len(), 64);

        let mut sink = CountingSink::new();
        flower.draw_field(&mut sink);
        assert!(sink.segments.is_empty(), "field layer defaults to hidden");
    }

    #[test]
    fn enabling_the_field_layer_emits_ticks() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&frame(Vec2::new(40.0, 50.0), false, false));
        flower.update(&frame(Vec2::new(60.0, 50.0), true, false));
        flower.layers_mut().field = true;

        let mut sink = CountingSink::new();
        flower.draw_field(&mut sink);
        assert!(!sink.segments.is_empty());
    }

    #[test]
    fn disabled_particle_layer_emits_nothing() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&frame(Vec2::splat(50.0), false, false));
        flower.layers_mut().particles = false;

        let mut sink = CountingSink::new();
        flower.draw_particles(&mut sink);
        assert!(sink.segments.is_empty());
    }

    #[test]
    fn brush_draws_only_while_awake() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&InputSnapshot {
            viewport: Vec2::splat(100.0),
            pointer: Vec2::new(60.0, 50.0),
            time_us: 0,
            ..InputSnapshot::default()
        });
        let mut sink = CountingSink::new();
        flower.draw_brush(&mut sink);
        assert_eq!(sink.segments.len(), draw::BRUSH_SEGMENTS);

        // Same pointer two seconds later: the cursor has gone to sleep.
        flower.update(&InputSnapshot {
            viewport: Vec2::splat(100.0),
            pointer: Vec2::new(60.0, 50.0),
            time_us: 2_000_000,
            ..InputSnapshot::default()
        });
        let mut sink = CountingSink::new();
        flower.draw_brush(&mut sink);
        assert!(sink.segments.is_empty());
    }

    #[test]
    fn brush_cursor_scales_radius_by_viewport_width() {
        let mut flower = Flower::new(small_params()).unwrap();
        flower.update(&InputSnapshot {
            viewport: Vec2::new(200.0, 100.0),
            pointer: Vec2::new(100.0, 50.0),
            ..InputSnapshot::default()
        });
        let mut sink = CountingSink::new();
        flower.draw_brush(&mut sink);

        let center = Vec2::new(100.0, 50.0);
        let expected_radius = flower.brush().radius() * 200.0;
        for seg in &sink.segments {
            let r = (seg.start - center).length();
            assert!((r - expected_radius).abs() < 1e-2, "radius {r}");
        }
    }
}
