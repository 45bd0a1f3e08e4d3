//! Ball state

use bevy::prelude::*;

/// Who governs the ball's position right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BallPhase {
    /// Resting on the floor; moved only by commands
    #[default]
    Grounded,
    /// Under projectile physics
    InFlight,
}

/// Cosmetic rotation, derived from horizontal velocity each step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallSpin {
    /// Unit rotation axis (zero when not rolling)
    pub axis: Vec3,
    /// Angular speed in radians per second
    pub speed: f32,
}

/// Kinematic state of the one ball on the court
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub phase: BallPhase,
    pub spin: BallSpin,
}

impl BallState {
    /// A ball at rest at `position`
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            phase: BallPhase::Grounded,
            spin: BallSpin::default(),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.phase == BallPhase::InFlight
    }

    /// Put the ball in flight with the given launch velocity
    pub fn launch(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.phase = BallPhase::InFlight;
    }

    /// Stop the ball where it is
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.phase = BallPhase::Grounded;
        self.spin = BallSpin::default();
    }
}
