//! Assertion checking for test expectations

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::GameEvent;
use crate::game::GameState;
use crate::scoring::SideStats;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub side: Option<String>,
}

impl CapturedEvent {
    /// Session bookkeeping events are not captured
    pub fn from_game_event(frame: u64, event: &GameEvent) -> Option<Self> {
        let (event_type, side) = match event {
            GameEvent::PowerChanged { .. } => ("PowerChanged", None),
            GameEvent::ShotAttempted { side, .. } => ("ShotAttempted", Some(side.name())),
            GameEvent::ShotMade { side, .. } => ("ShotMade", Some(side.name())),
            GameEvent::ShotMissed => ("ShotMissed", None),
            GameEvent::BallReset => ("BallReset", None),
            GameEvent::SessionStart { .. } | GameEvent::Config(_) => return None,
        };

        Some(CapturedEvent {
            frame,
            event_type: event_type.to_string(),
            side: side.map(str::to_string),
        })
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        // Find matching event starting from current position
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            if cap.event_type != exp.event {
                return false;
            }
            if let Some(ref exp_side) = exp.side {
                if cap.side.as_ref() != Some(exp_side) {
                    return false;
                }
            }
            true
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min {
                    if cap.frame < min {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                            expected: format!("frame >= {}", min),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                if let Some(max) = exp.frame_max {
                    if cap.frame > max {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                            expected: format!("frame <= {}", max),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                captured_idx += offset + 1;
            }
            None => {
                let side_str = exp.side.as_ref().map(|s| format!(" (side: {})", s)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, side_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!("events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Fail if any event named in `never` was captured
pub fn check_never(never: &[String], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    for name in never {
        if let Some(cap) = captured.iter().find(|c| &c.event_type == name) {
            return Err(AssertionError {
                message: format!("Forbidden event '{}' occurred", name),
                expected: format!("no '{}' event", name),
                actual: format!("'{}' at frame {}", name, cap.frame),
            });
        }
    }
    Ok(())
}

/// Game state flattened for assertions
#[derive(Debug, Clone)]
pub struct WorldState {
    pub ball: BallSnapshot,
    pub power: u8,
    pub attempt_live: bool,
    pub left: SideStats,
    pub right: SideStats,
}

#[derive(Debug, Clone)]
pub struct BallSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub velocity_z: f32,
    pub in_flight: bool,
}

impl WorldState {
    pub fn from_game(game: &GameState) -> Self {
        let ball = &game.ball;
        Self {
            ball: BallSnapshot {
                x: ball.position.x,
                y: ball.position.y,
                z: ball.position.z,
                velocity_x: ball.velocity.x,
                velocity_y: ball.velocity.y,
                velocity_z: ball.velocity.z,
                in_flight: ball.in_flight(),
            },
            power: game.power.value(),
            attempt_live: game.attempt.is_some(),
            left: game.score.left,
            right: game.score.right,
        }
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

enum Value {
    Number(f32),
    Flag(bool),
}

fn side_value(stats: &SideStats, field: Option<&&str>) -> Option<Value> {
    let v = match field {
        Some(&"points") => stats.points,
        Some(&"made") => stats.field_goals_made,
        Some(&"attempted") => stats.field_goals_attempted,
        Some(&"three_made") => stats.three_pointers_made,
        Some(&"three_attempted") => stats.three_pointers_attempted,
        _ => return None,
    };
    Some(Value::Number(v as f32))
}

fn lookup(path_parts: &[&str], state: &WorldState) -> Option<Value> {
    match path_parts.first() {
        Some(&"score") => match path_parts.get(1) {
            Some(&"left") => side_value(&state.left, path_parts.get(2)),
            Some(&"right") => side_value(&state.right, path_parts.get(2)),
            _ => None,
        },
        Some(&"ball") => {
            let ball = &state.ball;
            Some(match path_parts.get(1) {
                Some(&"x") => Value::Number(ball.x),
                Some(&"y") => Value::Number(ball.y),
                Some(&"z") => Value::Number(ball.z),
                Some(&"velocity_x") => Value::Number(ball.velocity_x),
                Some(&"velocity_y") => Value::Number(ball.velocity_y),
                Some(&"velocity_z") => Value::Number(ball.velocity_z),
                Some(&"in_flight") => Value::Flag(ball.in_flight),
                _ => return None,
            })
        }
        Some(&"power") => Some(Value::Number(state.power as f32)),
        Some(&"attempt") if path_parts.get(1) == Some(&"live") => {
            Some(Value::Flag(state.attempt_live))
        }
        _ => None,
    }
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path.to.value = value' or 'path.to.value > value'".to_string(),
            actual: check.clone(),
        })?;

        let path_parts: Vec<&str> = path.split('.').collect();
        let value = lookup(&path_parts, state).ok_or_else(|| AssertionError {
            message: format!("Unknown state path '{}'", path),
            expected: "score.<side>.<stat>, ball.<field>, power or attempt.live".to_string(),
            actual: path.to_string(),
        })?;

        match value {
            Value::Number(actual) => check_float_comparison(path, actual, operator, expected_value)?,
            Value::Flag(actual) => check_bool(check, actual, operator, expected_value)?,
        }
    }

    Ok(())
}

fn check_bool(check: &str, actual: bool, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let expected = match expected_str {
        "true" => true,
        "false" => false,
        _ => {
            return Err(AssertionError {
                message: format!("Invalid value in {}", check),
                expected: "true or false".to_string(),
                actual: expected_str.to_string(),
            });
        }
    };
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => false,
    };
    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: format!("{} {}", operator, expected_str),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.01,
        "!=" => (actual - value).abs() >= 0.01,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.2})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.2}", actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(events: &[(u64, &str)]) -> Vec<CapturedEvent> {
        events
            .iter()
            .map(|(frame, name)| CapturedEvent {
                frame: *frame,
                event_type: name.to_string(),
                side: None,
            })
            .collect()
    }

    fn expected(name: &str, frame_max: Option<u64>) -> ExpectedEvent {
        ExpectedEvent {
            event: name.to_string(),
            side: None,
            frame_min: None,
            frame_max,
        }
    }

    #[test]
    fn test_sequence_in_order() {
        let caps = captured(&[(0, "ShotAttempted"), (104, "ShotMade")]);
        assert!(check_sequence(&[expected("ShotAttempted", None), expected("ShotMade", None)], &caps).is_ok());
        assert!(check_sequence(&[expected("ShotMade", None), expected("ShotAttempted", None)], &caps).is_err());
        assert!(check_sequence(&[expected("ShotMade", Some(50))], &caps).is_err());
    }

    #[test]
    fn test_never() {
        let caps = captured(&[(0, "ShotAttempted"), (20, "BallReset")]);
        assert!(check_never(&["ShotMissed".to_string()], &caps).is_ok());
        assert!(check_never(&["BallReset".to_string()], &caps).is_err());
    }

    #[test]
    fn test_state_checks() {
        let mut game = GameState::default();
        game.score.record_attempt(crate::world::Basket::Left, true);
        game.score.record_make(crate::world::Basket::Left, true);
        let state = WorldState::from_game(&game);

        let ok = StateAssertion {
            after_frame: 0,
            checks: vec![
                "score.left.points = 3".to_string(),
                "score.left.three_made >= 1".to_string(),
                "score.right.attempted = 0".to_string(),
                "ball.in_flight = false".to_string(),
                "power = 50".to_string(),
                "attempt.live != true".to_string(),
            ],
        };
        assert!(check_state(&ok, &state).is_ok());

        let bad = StateAssertion {
            after_frame: 0,
            checks: vec!["score.left.points = 2".to_string()],
        };
        assert!(check_state(&bad, &state).is_err());

        let unknown = StateAssertion {
            after_frame: 0,
            checks: vec!["score.middle.points = 0".to_string()],
        };
        assert!(check_state(&unknown, &state).is_err());
    }
}
