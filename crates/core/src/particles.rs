//! Particle pool advected by the flow field.
//!
//! Particles live in struct-of-arrays layout (positions, velocities,
//! lifetimes) and are advected with a frame-synchronous Euler step: the
//! field force only applies while a particle sits strictly inside the unit
//! square, so escaped particles coast to a stop under friction until their
//! lifetime runs out and they respawn.

use glam::Vec2;

use crate::field::FlowField;
use crate::prng::Xorshift64;

/// Scale from sampled field velocity to per-frame particle force.
pub const FORCE_SCALE: f32 = 0.002;
/// Per-frame velocity retention factor.
pub const FRICTION: f32 = 0.1;
/// Upper bound (inclusive) for a freshly rolled lifetime, in frames.
pub const MAX_LIFETIME: u32 = 80;

/// A pool of streak particles in struct-of-arrays layout.
#[derive(Debug, Clone)]
pub struct Particles {
    pos: Vec<Vec2>,
    vel: Vec<Vec2>,
    life: Vec<u32>,
}

impl Particles {
    /// Creates `count` particles at random positions in the unit square
    /// with zero velocity and zero lifetime.
    ///
    /// Zero lifetime makes every particle respawn on the first update, so
    /// the pool starts with field-seeded velocities and staggered lifetimes
    /// instead of a synchronized burst.
    pub fn new(count: usize, rng: &mut Xorshift64) -> Self {
        let mut pos = Vec::with_capacity(count);
        for _ in 0..count {
            pos.push(Vec2::new(rng.next_f32(), rng.next_f32()));
        }
        Self {
            pos,
            vel: vec![Vec2::ZERO; count],
            life: vec![0; count],
        }
    }

    /// Number of particles in the pool.
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    /// True when the pool holds no particles.
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Particle positions in normalized coordinates.
    pub fn positions(&self) -> &[Vec2] {
        &self.pos
    }

    /// Particle velocities in normalized units per frame.
    pub fn velocities(&self) -> &[Vec2] {
        &self.vel
    }

    /// Remaining lifetimes in frames.
    pub fn lifetimes(&self) -> &[u32] {
        &self.life
    }

    /// Advances every particle by one frame.
    ///
    /// Per particle: sample the field force (zero outside the open unit
    /// square), step position by the current velocity, apply friction, add
    /// the force, then either respawn (lifetime zero: new random position,
    /// velocity seeded from the field there, lifetime rolled in
    /// `0..=MAX_LIFETIME`) or decrement the lifetime. The order is load
    /// bearing: the force that moved the particle this frame was sampled at
    /// its pre-step position.
    pub fn update(&mut self, field: &FlowField, rng: &mut Xorshift64) {
        for i in 0..self.pos.len() {
            let pos = self.pos[i];
            let inside =
                pos.x > 0.0 && pos.x < 1.0 && pos.y > 0.0 && pos.y < 1.0;
            let force = if inside {
                field.sample(pos) * FORCE_SCALE
            } else {
                Vec2::ZERO
            };

            self.pos[i] += self.vel[i];
            self.vel[i] *= FRICTION;
            self.vel[i] += force;

            if self.life[i] == 0 {
                let spawn = Vec2::new(rng.next_f32(), rng.next_f32());
                self.pos[i] = spawn;
                self.vel[i] = field.sample(spawn) * FORCE_SCALE;
                self.life[i] = rng.next_u32(MAX_LIFETIME + 1);
            } else {
                self.life[i] -= 1;
            }
        }
    }
}

#[cfg(test)]
impl Particles {
    /// Test hook: overwrite one particle's state.
    pub(crate) fn set_state(&mut self, i: usize, pos: Vec2, vel: Vec2, life: u32) {
        self.pos[i] = pos;
        self.vel[i] = vel;
        self.life[i] = life;
    }
}
