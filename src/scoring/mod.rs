//! Scoring module - score tracking and make/miss detection

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::BallState;
use crate::shooting::ShotAttempt;
use crate::tuning::ShotTuning;
use crate::world::{Basket, nearest_basket};

/// Shooting line for one half of the court
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideStats {
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub points: u32,
}

impl SideStats {
    /// Made / attempted, or 0 before the first attempt
    pub fn field_goal_pct(&self) -> f32 {
        if self.field_goals_attempted == 0 {
            0.0
        } else {
            self.field_goals_made as f32 / self.field_goals_attempted as f32
        }
    }
}

/// Per-side counters. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: SideStats,
    pub right: SideStats,
}

impl Score {
    pub fn side(&self, side: Basket) -> &SideStats {
        match side {
            Basket::Left => &self.left,
            Basket::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Basket) -> &mut SideStats {
        match side {
            Basket::Left => &mut self.left,
            Basket::Right => &mut self.right,
        }
    }

    pub fn record_attempt(&mut self, side: Basket, three_point: bool) {
        let stats = self.side_mut(side);
        stats.field_goals_attempted += 1;
        if three_point {
            stats.three_pointers_attempted += 1;
        }
    }

    /// Credit a make and return the points awarded
    pub fn record_make(&mut self, side: Basket, three_point: bool) -> u32 {
        let stats = self.side_mut(side);
        let points = if three_point { 3 } else { 2 };
        stats.field_goals_made += 1;
        if three_point {
            stats.three_pointers_made += 1;
        }
        stats.points += points;
        points
    }
}

/// Resolution of a shot attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Made {
        side: Basket,
        points: u32,
        three_point: bool,
    },
    Missed,
}

/// Decides make/miss for the live attempt, once per attempt.
///
/// After a make the detector stays latched until the ball climbs back above
/// the rim by the latch clearance, so a ball rattling around rim height
/// cannot be counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeDetector {
    made_latched: bool,
}

impl OutcomeDetector {
    pub fn is_latched(&self) -> bool {
        self.made_latched
    }

    pub fn clear(&mut self) {
        self.made_latched = false;
    }

    /// Check the frame that moved the ball from height `prev_y` to its
    /// current position. Make is evaluated before miss. A resolved attempt is
    /// taken out of `attempt`.
    pub fn check(
        &mut self,
        prev_y: f32,
        ball: &BallState,
        attempt: &mut Option<ShotAttempt>,
        score: &mut Score,
        tuning: &ShotTuning,
    ) -> Option<ShotOutcome> {
        let rim = tuning.rim_height;
        let y = ball.position.y;

        if self.made_latched && y > rim + tuning.made_latch_clearance {
            self.made_latched = false;
        }

        let crossing_down = prev_y > rim && y <= rim;
        if crossing_down && !self.made_latched {
            if let Some(live) = attempt.as_ref() {
                let (basket, distance) = nearest_basket(ball.position, tuning);
                if distance < tuning.made_threshold() && live.power_in_sweetspot() {
                    let three_point = live.three_point;
                    let points = score.record_make(basket, three_point);
                    *attempt = None;
                    self.made_latched = true;
                    return Some(ShotOutcome::Made {
                        side: basket,
                        points,
                        three_point,
                    });
                }
            }
        }

        if attempt.as_ref().is_some_and(|live| live.peaked() && y <= rim) {
            *attempt = None;
            return Some(ShotOutcome::Missed);
        }

        None
    }

    /// Ball reached the floor: anything still live there can no longer score
    pub fn resolve_landing(&mut self, attempt: &mut Option<ShotAttempt>) -> Option<ShotOutcome> {
        attempt.take().map(|_| ShotOutcome::Missed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shooting::{AttemptStatus, ShotPower, Sweetspot};

    fn attempt(power: i32, three_point: bool, status: AttemptStatus) -> ShotAttempt {
        let tuning = ShotTuning::default();
        ShotAttempt {
            power: ShotPower::new(power),
            sweetspot: Sweetspot::around(50.0, 7.0),
            launch_position: Vec3::new(10.0, tuning.floor_height(), 0.0),
            target: Basket::Right,
            target_position: Basket::Right.rim_center(&tuning),
            three_point,
            status,
        }
    }

    fn ball_at(position: Vec3) -> BallState {
        let mut ball = BallState::at_rest(position);
        ball.launch(Vec3::new(0.0, -5.0, 0.0));
        ball
    }

    #[test]
    fn test_make_through_rim_center() {
        let tuning = ShotTuning::default();
        let mut detector = OutcomeDetector::default();
        let mut score = Score::default();
        let mut live = Some(attempt(50, false, AttemptStatus::Peaked));
        let ball = ball_at(Vec3::new(tuning.rim_x - 0.1, tuning.rim_height - 0.05, 0.0));

        let outcome = detector.check(tuning.rim_height + 0.05, &ball, &mut live, &mut score, &tuning);

        assert_eq!(
            outcome,
            Some(ShotOutcome::Made {
                side: Basket::Right,
                points: 2,
                three_point: false
            })
        );
        assert!(live.is_none());
        assert!(detector.is_latched());
        assert_eq!(score.right.points, 2);
        assert_eq!(score.right.field_goals_made, 1);
        assert_eq!(score.left, SideStats::default());
    }

    #[test]
    fn test_three_point_make_adds_three() {
        let tuning = ShotTuning::default();
        let mut detector = OutcomeDetector::default();
        let mut score = Score::default();
        let mut live = Some(attempt(50, true, AttemptStatus::Peaked));
        let ball = ball_at(Vec3::new(tuning.rim_x, tuning.rim_height, 0.05));

        detector.check(tuning.rim_height + 0.1, &ball, &mut live, &mut score, &tuning);

        assert_eq!(score.right.points, 3);
        assert_eq!(score.right.three_pointers_made, 1);
        assert_eq!(score.right.field_goals_made, 1);
    }

    #[test]
    fn test_power_outside_sweetspot_is_miss() {
        let tuning = ShotTuning::default();
        let mut detector = OutcomeDetector::default();
        let mut score = Score::default();
        let mut live = Some(attempt(90, false, AttemptStatus::Peaked));
        let ball = ball_at(Vec3::new(tuning.rim_x, tuning.rim_height - 0.05, 0.0));

        let outcome = detector.check(tuning.rim_height + 0.05, &ball, &mut live, &mut score, &tuning);

        assert_eq!(outcome, Some(ShotOutcome::Missed));
        assert!(live.is_none());
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_wide_crossing_is_miss() {
        let tuning = ShotTuning::default();
        let mut detector = OutcomeDetector::default();
        let mut score = Score::default();
        let mut live = Some(attempt(50, false, AttemptStatus::Peaked));
        let ball = ball_at(Vec3::new(tuning.rim_x - 1.0, tuning.rim_height - 0.05, 0.0));

        let outcome = detector.check(tuning.rim_height + 0.05, &ball, &mut live, &mut score, &tuning);
        assert_eq!(outcome, Some(ShotOutcome::Missed));
    }

    #[test]
    fn test_no_outcome_before_peak_or_above_rim() {
        let tuning = ShotTuning::default();
        let mut detector = OutcomeDetector::default();
        let mut score = Score::default();

        // Rising below the rim
        let mut live = Some(attempt(50, false, AttemptStatus::Pending));
        let ball = ball_at(Vec3::new(8.0, 2.0, 0.0));
        assert_eq!(detector.check(1.9, &ball, &mut live, &mut score, &tuning), None);
        assert!(live.is_some());

        // Falling but still above
        live.as_mut().unwrap().mark_peaked();
        let ball = ball_at(Vec3::new(12.0, 4.0, 0.0));
        assert_eq!(detector.check(4.1, &ball, &mut live, &mut score, &tuning), None);
        assert!(live.is_some());
    }

    #[test]
    fn test_latch_blocks_until_ball_clears_rim() {
        let tuning = ShotTuning::default();
        let mut detector = OutcomeDetector::default();
        let mut score = Score::default();
        let rim = tuning.rim_height;
        let through = Vec3::new(tuning.rim_x, rim - 0.01, 0.0);

        let mut live = Some(attempt(50, false, AttemptStatus::Peaked));
        detector.check(rim + 0.01, &ball_at(through), &mut live, &mut score, &tuning);
        assert!(detector.is_latched());

        // A fresh attempt crossing while latched does not score
        let mut again = Some(attempt(50, false, AttemptStatus::Pending));
        let outcome = detector.check(rim + 0.01, &ball_at(through), &mut again, &mut score, &tuning);
        assert_eq!(outcome, None);
        assert_eq!(score.right.points, 2);

        // Clearing the rim releases the latch
        let high = Vec3::new(tuning.rim_x, rim + tuning.made_latch_clearance + 0.1, 0.0);
        detector.check(rim, &ball_at(high), &mut again, &mut score, &tuning);
        assert!(!detector.is_latched());
    }

    #[test]
    fn test_landing_resolves_live_attempt() {
        let mut detector = OutcomeDetector::default();
        let mut live = Some(attempt(50, false, AttemptStatus::Pending));
        assert_eq!(detector.resolve_landing(&mut live), Some(ShotOutcome::Missed));
        assert!(live.is_none());
        assert_eq!(detector.resolve_landing(&mut live), None);
    }

    #[test]
    fn test_field_goal_pct() {
        let mut score = Score::default();
        assert_eq!(score.left.field_goal_pct(), 0.0);
        score.record_attempt(Basket::Left, false);
        score.record_attempt(Basket::Left, true);
        score.record_make(Basket::Left, true);
        assert_eq!(score.left.field_goals_attempted, 2);
        assert_eq!(score.left.three_pointers_attempted, 1);
        assert!((score.left.field_goal_pct() - 0.5).abs() < 1e-6);
    }
}
