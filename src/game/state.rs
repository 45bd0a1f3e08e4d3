//! GameState - the single owner of everything a shooting session mutates

use bevy::prelude::*;

use crate::ShotError;
use crate::ball::{BallState, integrate_ball};
use crate::constants::MAX_FRAME_DT;
use crate::events::{EventBus, GameEvent};
use crate::input::ShotCommand;
use crate::scoring::{OutcomeDetector, Score, ShotOutcome};
use crate::shooting::{AimReading, ShotAttempt, ShotPower, launch_shot, read_aim};
use crate::tuning::ShotTuning;
use crate::world::{center_court, clamp_to_court};

/// Whether a command changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Not allowed right now (e.g. shooting while the ball flies); nothing changed
    Ignored,
}

/// Ball, power, live attempt and score for one court.
///
/// Commands and frame ticks are applied synchronously. At most one attempt
/// is live, and only while the ball is in flight.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameState {
    pub tuning: ShotTuning,
    pub ball: BallState,
    pub power: ShotPower,
    pub attempt: Option<ShotAttempt>,
    pub score: Score,
    pub detector: OutcomeDetector,
    /// Most recent make/miss, for the HUD
    pub last_outcome: Option<ShotOutcome>,
    /// Frames stepped so far
    pub frame: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(ShotTuning::default())
    }
}

impl GameState {
    pub fn new(tuning: ShotTuning) -> Self {
        Self {
            ball: BallState::at_rest(center_court(&tuning)),
            power: ShotPower::new(tuning.default_power as i32),
            attempt: None,
            score: Score::default(),
            detector: OutcomeDetector::default(),
            last_outcome: None,
            frame: 0,
            tuning,
        }
    }

    /// Put a resting ball at `(x, z)` on the floor, clamped to the court
    pub fn place_ball(&mut self, x: f32, z: f32) {
        let mut position = Vec3::new(x, self.tuning.floor_height(), z);
        clamp_to_court(&mut position, &self.tuning);
        self.ball = BallState::at_rest(position);
        self.attempt = None;
    }

    /// Swap in new tuning. A resting ball is re-seated on the new floor height.
    pub fn set_tuning(&mut self, tuning: ShotTuning) {
        self.tuning = tuning;
        if !self.ball.in_flight() {
            self.ball.position.y = self.tuning.floor_height();
            clamp_to_court(&mut self.ball.position, &self.tuning);
        }
    }

    /// Aim/power reading for the ball where it is now
    pub fn aim(&self) -> AimReading {
        read_aim(self.ball.position, self.power, &self.tuning)
    }

    /// Apply one player command.
    ///
    /// Shoot and move while the ball is in flight are ignored. An `Err` means
    /// the trajectory could not be solved; the state is left untouched.
    pub fn handle_command(
        &mut self,
        command: ShotCommand,
        bus: &mut EventBus,
    ) -> Result<CommandOutcome, ShotError> {
        match command {
            ShotCommand::Move(direction) => {
                if self.ball.in_flight() {
                    return Ok(CommandOutcome::Ignored);
                }
                self.ball.position += direction.offset(self.tuning.move_step);
                clamp_to_court(&mut self.ball.position, &self.tuning);
                Ok(CommandOutcome::Applied)
            }
            ShotCommand::PowerUp => Ok(self.set_power(self.power.raised(self.tuning.power_step), bus)),
            ShotCommand::PowerDown => {
                Ok(self.set_power(self.power.lowered(self.tuning.power_step), bus))
            }
            ShotCommand::Shoot => {
                if self.ball.in_flight() {
                    return Ok(CommandOutcome::Ignored);
                }
                let attempt = launch_shot(&mut self.ball, self.power, &self.tuning)?;
                self.score.record_attempt(attempt.target, attempt.three_point);
                bus.emit(GameEvent::ShotAttempted {
                    side: attempt.target,
                    power: attempt.power.value(),
                    three_point: attempt.three_point,
                });
                self.attempt = Some(attempt);
                Ok(CommandOutcome::Applied)
            }
            ShotCommand::Reset => {
                self.reset(bus);
                Ok(CommandOutcome::Applied)
            }
        }
    }

    fn set_power(&mut self, power: ShotPower, bus: &mut EventBus) -> CommandOutcome {
        if power == self.power {
            return CommandOutcome::Ignored;
        }
        self.power = power;
        bus.emit(GameEvent::PowerChanged {
            power: power.value(),
        });
        CommandOutcome::Applied
    }

    /// Ball back to center court. A pending attempt is dropped without an
    /// outcome; power and score are kept.
    pub fn reset(&mut self, bus: &mut EventBus) {
        self.ball = BallState::at_rest(center_court(&self.tuning));
        self.attempt = None;
        self.detector.clear();
        bus.emit(GameEvent::BallReset);
    }

    /// Advance the simulation by `dt` seconds and resolve the live attempt.
    ///
    /// Negative or non-finite `dt` is ignored; anything above the frame cap
    /// is clamped to it.
    pub fn tick(&mut self, dt: f32, bus: &mut EventBus) -> Option<ShotOutcome> {
        if !dt.is_finite() || dt < 0.0 {
            return None;
        }
        let dt = dt.min(MAX_FRAME_DT);
        self.frame += 1;

        if !self.ball.in_flight() {
            return None;
        }

        let prev_y = self.ball.position.y;
        let report = integrate_ball(&mut self.ball, dt, &self.tuning);

        if report.apex {
            if let Some(attempt) = self.attempt.as_mut() {
                attempt.mark_peaked();
            }
        }

        let mut outcome = self.detector.check(
            prev_y,
            &self.ball,
            &mut self.attempt,
            &mut self.score,
            &self.tuning,
        );
        if outcome.is_none() && report.landed {
            outcome = self.detector.resolve_landing(&mut self.attempt);
        }

        if let Some(resolved) = outcome {
            bus.emit(match resolved {
                ShotOutcome::Made {
                    side,
                    points,
                    three_point,
                } => GameEvent::ShotMade {
                    side,
                    points,
                    three_point,
                },
                ShotOutcome::Missed => GameEvent::ShotMissed,
            });
            self.last_outcome = Some(resolved);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use crate::world::Basket;

    const DT: f32 = 1.0 / 60.0;

    /// Ball at (x, z) with the given power, no events yet
    fn setup(x: f32, z: f32, power: i32) -> (GameState, EventBus) {
        let mut game = GameState::default();
        game.place_ball(x, z);
        game.power = ShotPower::new(power);
        (game, EventBus::new())
    }

    /// Step until the ball rests or `max_frames` pass; collect outcomes
    fn run_until_rest(game: &mut GameState, bus: &mut EventBus, max_frames: usize) -> Vec<ShotOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..max_frames {
            if let Some(outcome) = game.tick(DT, bus) {
                outcomes.push(outcome);
            }
            if !game.ball.in_flight() {
                break;
            }
        }
        outcomes
    }

    fn event_codes(bus: &mut EventBus) -> Vec<&'static str> {
        bus.drain().iter().map(|e| e.event.type_code()).collect()
    }

    #[test]
    fn test_center_court_ideal_power_scores_three() {
        let (mut game, mut bus) = setup(0.0, 0.0, 97);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        let outcomes = run_until_rest(&mut game, &mut bus, 2000);

        // Center court is equidistant, so ties aim at the left rim
        assert_eq!(
            outcomes,
            vec![ShotOutcome::Made {
                side: Basket::Left,
                points: 3,
                three_point: true
            }]
        );
        assert_eq!(game.score.left.points, 3);
        assert_eq!(game.score.left.field_goals_made, 1);
        assert_eq!(game.score.right, Default::default());
        assert!(game.attempt.is_none());
        assert_eq!(event_codes(&mut bus), vec!["SA", "SM"]);
    }

    #[test]
    fn test_close_shot_scores_two_on_right() {
        let (mut game, mut bus) = setup(10.0, 0.0, 51);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        let outcomes = run_until_rest(&mut game, &mut bus, 2000);
        assert_eq!(
            outcomes,
            vec![ShotOutcome::Made {
                side: Basket::Right,
                points: 2,
                three_point: false
            }]
        );
        assert_eq!(game.score.right.points, 2);
        assert_eq!(game.score.right.three_pointers_attempted, 0);
    }

    #[test]
    fn test_three_pointer_adds_three() {
        let (mut game, mut bus) = setup(7.0, 0.0, 65);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        run_until_rest(&mut game, &mut bus, 2000);
        assert_eq!(game.score.right.points, 3);
        assert_eq!(game.score.right.three_pointers_made, 1);
        assert_eq!(game.score.right.three_pointers_attempted, 1);
    }

    #[test]
    fn test_zero_power_near_rim_misses_once() {
        let (mut game, mut bus) = setup(13.6, 0.0, 0);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        let outcomes = run_until_rest(&mut game, &mut bus, 2000);
        assert_eq!(outcomes, vec![ShotOutcome::Missed]);
        assert_eq!(game.score.right.points, 0);
        assert_eq!(game.score.right.field_goals_attempted, 1);
        assert_eq!(event_codes(&mut bus), vec!["SA", "SX"]);
    }

    #[test]
    fn test_weak_center_court_shot_misses() {
        let (mut game, mut bus) = setup(0.0, 0.0, 50);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        let outcomes = run_until_rest(&mut game, &mut bus, 2000);
        assert_eq!(outcomes, vec![ShotOutcome::Missed]);
        assert_eq!(game.score.left.points, 0);
    }

    #[test]
    fn test_shoot_while_in_flight_is_ignored() {
        let (mut game, mut bus) = setup(10.0, 0.0, 51);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        for _ in 0..10 {
            game.tick(DT, &mut bus);
        }
        let before = game.clone();
        let result = game.handle_command(ShotCommand::Shoot, &mut bus);
        assert_eq!(result, Ok(CommandOutcome::Ignored));
        assert_eq!(game, before);
        assert_eq!(game.score.right.field_goals_attempted, 1);
        assert_eq!(event_codes(&mut bus), vec!["SA"]);
    }

    #[test]
    fn test_reset_mid_flight_discards_attempt() {
        let (mut game, mut bus) = setup(10.0, 0.0, 51);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        for _ in 0..20 {
            game.tick(DT, &mut bus);
        }
        game.handle_command(ShotCommand::Reset, &mut bus).unwrap();

        assert!(!game.ball.in_flight());
        assert!(game.attempt.is_none());
        assert_eq!(game.ball.position, center_court(&game.tuning));
        assert_eq!(game.ball.velocity, Vec3::ZERO);
        assert_eq!(game.power, ShotPower::new(51));

        // Nothing left to resolve
        for _ in 0..300 {
            assert_eq!(game.tick(DT, &mut bus), None);
        }
        assert_eq!(event_codes(&mut bus), vec!["SA", "RB"]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut game, mut bus) = setup(4.0, -2.0, 80);
        game.reset(&mut bus);
        let once = game.clone();
        game.reset(&mut bus);
        assert_eq!(game, once);
    }

    #[test]
    fn test_power_commands_clamp_and_emit_on_change() {
        let (mut game, mut bus) = setup(0.0, 0.0, 95);
        assert_eq!(
            game.handle_command(ShotCommand::PowerUp, &mut bus),
            Ok(CommandOutcome::Applied)
        );
        assert_eq!(game.power.value(), 100);
        assert_eq!(
            game.handle_command(ShotCommand::PowerUp, &mut bus),
            Ok(CommandOutcome::Ignored)
        );
        game.handle_command(ShotCommand::PowerDown, &mut bus).unwrap();
        assert_eq!(game.power.value(), 95);

        let events: Vec<_> = bus.drain().into_iter().map(|e| e.event).collect();
        assert_eq!(
            events,
            vec![
                GameEvent::PowerChanged { power: 100 },
                GameEvent::PowerChanged { power: 95 }
            ]
        );
    }

    #[test]
    fn test_move_only_while_grounded() {
        let (mut game, mut bus) = setup(0.0, 0.0, 50);
        game.handle_command(ShotCommand::Move(Direction::Right), &mut bus).unwrap();
        assert_eq!(game.ball.position.x, 0.5);

        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        let before = game.ball;
        assert_eq!(
            game.handle_command(ShotCommand::Move(Direction::Left), &mut bus),
            Ok(CommandOutcome::Ignored)
        );
        assert_eq!(game.ball, before);
    }

    #[test]
    fn test_move_clamped_to_court() {
        let (mut game, mut bus) = setup(0.0, 7.0, 50);
        for _ in 0..5 {
            game.handle_command(ShotCommand::Move(Direction::Down), &mut bus).unwrap();
        }
        assert_eq!(game.ball.position.z, game.tuning.court_half_width - game.tuning.ball_radius);
    }

    #[test]
    fn test_negative_dt_is_ignored_and_large_dt_clamped() {
        let (mut game, mut bus) = setup(10.0, 0.0, 51);
        game.handle_command(ShotCommand::Shoot, &mut bus).unwrap();
        let before = game.ball;
        game.tick(-0.5, &mut bus);
        assert_eq!(game.ball, before);

        let mut capped = game.clone();
        game.tick(5.0, &mut bus);
        capped.tick(MAX_FRAME_DT, &mut bus);
        assert_eq!(game.ball, capped.ball);
    }

    #[test]
    fn test_failed_launch_leaves_state_untouched() {
        let tuning = ShotTuning {
            ball_radius: 6.0,
            court_half_length: 30.0,
            court_half_width: 20.0,
            ..Default::default()
        };
        let mut game = GameState::new(tuning);
        let mut bus = EventBus::new();
        let before = game.clone();
        let result = game.handle_command(ShotCommand::Shoot, &mut bus);
        assert!(matches!(result, Err(ShotError::DegenerateArc { .. })));
        assert_eq!(game, before);
        assert!(!bus.has_pending());
    }
}
