//! Ball physics: gravity, court bounds, floor bounce

use bevy::prelude::*;

use crate::ball::components::*;
use crate::helpers::horizontal;
use crate::tuning::ShotTuning;
use crate::world::clamp_to_court;

/// What happened during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Vertical velocity went from rising to not rising this step
    pub apex: bool,
    /// Ball reached the floor this step
    pub landed: bool,
    /// Ball bounced off the floor
    pub bounced: bool,
    /// Ball came to rest (now grounded)
    pub came_to_rest: bool,
}

/// Advance an in-flight ball by `dt` seconds.
///
/// Semi-implicit Euler: gravity updates velocity first, then the new velocity
/// moves the ball. Grounded balls are left untouched.
pub fn integrate_ball(ball: &mut BallState, dt: f32, tuning: &ShotTuning) -> StepReport {
    let mut report = StepReport::default();
    if !ball.in_flight() || dt <= 0.0 {
        return report;
    }

    let prev_vy = ball.velocity.y;
    ball.velocity.y -= tuning.gravity * dt;
    report.apex = prev_vy > 0.0 && ball.velocity.y <= 0.0;

    ball.position += ball.velocity * dt;
    clamp_to_court(&mut ball.position, tuning);

    let floor = tuning.floor_height();
    if ball.position.y <= floor {
        ball.position.y = floor;
        report.landed = true;

        if ball.velocity.y.abs() > tuning.ball_bounce_threshold {
            ball.velocity.y = ball.velocity.y.abs() * tuning.ball_bounce;
            ball.velocity.x *= tuning.ball_bounce_damping;
            ball.velocity.z *= tuning.ball_bounce_damping;
            report.bounced = true;
        } else {
            ball.stop();
            report.came_to_rest = true;
            return report;
        }
    }

    update_spin(ball, tuning);
    report
}

/// Rolling-style spin from horizontal velocity: axis = up × v, ω = |v| / r
pub fn update_spin(ball: &mut BallState, tuning: &ShotTuning) {
    let flat = horizontal(ball.velocity);
    let speed = flat.length();
    if speed < 1e-4 {
        ball.spin = BallSpin::default();
        return;
    }
    let flat_velocity = Vec3::new(flat.x, 0.0, flat.y);
    ball.spin = BallSpin {
        axis: Vec3::Y.cross(flat_velocity).normalize_or_zero(),
        speed: speed / tuning.ball_radius,
    };
}
