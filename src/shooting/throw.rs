//! Ball launch: aim reading -> launch velocity -> attempt record

use bevy::prelude::*;

use crate::ball::BallState;
use crate::helpers::horizontal_distance;
use crate::shooting::{AttemptStatus, ShotAttempt, ShotPower, read_aim};
use crate::tuning::ShotTuning;
use crate::{ShotError, solve_launch};

/// Launch the ball at the nearest hoop with the chosen power.
///
/// The ball is only touched once the trajectory has been solved, so an error
/// leaves it exactly as it was.
pub fn launch_shot(
    ball: &mut BallState,
    power: ShotPower,
    tuning: &ShotTuning,
) -> Result<ShotAttempt, ShotError> {
    if ball.in_flight() {
        return Err(ShotError::AlreadyInFlight);
    }

    let aim = read_aim(ball.position, power, tuning);
    let target_position = aim.basket.rim_center(tuning);

    let solution = solve_launch(
        ball.position,
        target_position,
        tuning.peak_height(),
        tuning.gravity,
    )?;

    let velocity = solution.velocity * aim.scale;
    let three_point =
        horizontal_distance(ball.position, target_position) > tuning.three_point_radius;

    debug!(
        "Launch toward {} rim: power {} (ideal {:.1}, window {:.1}-{:.1}), scale {:.3}, v=({:.2}, {:.2}, {:.2})",
        aim.basket.name(),
        power,
        aim.ideal_power,
        aim.sweetspot.start,
        aim.sweetspot.end,
        aim.scale,
        velocity.x,
        velocity.y,
        velocity.z,
    );

    let attempt = ShotAttempt {
        power,
        sweetspot: aim.sweetspot,
        launch_position: ball.position,
        target: aim.basket,
        target_position,
        three_point,
        status: AttemptStatus::Pending,
    };
    ball.launch(velocity);
    Ok(attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;

    #[test]
    fn test_launch_puts_ball_in_flight() {
        let tuning = ShotTuning::default();
        let mut ball = BallState::at_rest(Vec3::new(10.0, tuning.floor_height(), 0.0));
        let attempt = launch_shot(&mut ball, ShotPower::new(51), &tuning).unwrap();
        assert!(ball.in_flight());
        assert!(ball.velocity.x > 0.0 && ball.velocity.y > 0.0);
        assert_eq!(attempt.target, Basket::Right);
        assert!(!attempt.three_point);
        assert!(attempt.power_in_sweetspot());
        assert_eq!(attempt.status, AttemptStatus::Pending);
    }

    #[test]
    fn test_long_shot_flagged_three_point() {
        let tuning = ShotTuning::default();
        let mut ball = BallState::at_rest(Vec3::new(5.0, tuning.floor_height(), 0.0));
        let attempt = launch_shot(&mut ball, ShotPower::new(74), &tuning).unwrap();
        assert!(attempt.three_point);
        assert_eq!(attempt.points(), 3);
    }

    #[test]
    fn test_power_scale_multiplies_whole_velocity() {
        let tuning = ShotTuning::default();
        let start = Vec3::new(13.6, tuning.floor_height(), 0.0);

        let mut perfect = BallState::at_rest(start);
        launch_shot(&mut perfect, ShotPower::new(34), &tuning).unwrap();
        let mut weak = BallState::at_rest(start);
        launch_shot(&mut weak, ShotPower::new(0), &tuning).unwrap();

        let ratio = weak.velocity / perfect.velocity;
        assert!((ratio.x - 0.85).abs() < 1e-4);
        assert!((ratio.y - 0.85).abs() < 1e-4);
    }

    #[test]
    fn test_launch_rejected_in_flight() {
        let tuning = ShotTuning::default();
        let mut ball = BallState::at_rest(Vec3::new(0.0, tuning.floor_height(), 0.0));
        ball.launch(Vec3::new(1.0, 2.0, 3.0));
        let before = ball;
        assert_eq!(
            launch_shot(&mut ball, ShotPower::new(50), &tuning),
            Err(ShotError::AlreadyInFlight)
        );
        assert_eq!(ball, before);
    }

    #[test]
    fn test_degenerate_arc_leaves_ball_untouched() {
        let tuning = ShotTuning::default();
        // Launch point above the arc peak
        let mut ball = BallState::at_rest(Vec3::new(0.0, 8.0, 0.0));
        let before = ball;
        let result = launch_shot(&mut ball, ShotPower::new(50), &tuning);
        assert!(matches!(result, Err(ShotError::DegenerateArc { .. })));
        assert_eq!(ball, before);
    }
}
