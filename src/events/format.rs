//! Compact text format for game event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = 2-char event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|SE|5f0c...|2026-01-01T00:00:00+00:00
//! T:00420|PW|55
//! T:01200|SA|R|55|0
//! T:02950|SM|R|2|0
//! T:04100|SX|
//! T:05000|RB|
//! ```

use super::types::GameEvent;
use crate::tuning::ShotTuning;
use crate::world::Basket;

fn fmt_flag(v: bool) -> &'static str {
    if v { "1" } else { "0" }
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(tuning) => {
            // Tuning as compact JSON for easy parsing
            serde_json::to_string(tuning).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::PowerChanged { power } => power.to_string(),
        GameEvent::ShotAttempted {
            side,
            power,
            three_point,
        } => format!("{}|{}|{}", side, power, fmt_flag(*three_point)),
        GameEvent::ShotMade {
            side,
            points,
            three_point,
        } => format!("{}|{}|{}", side, points, fmt_flag(*three_point)),
        GameEvent::ShotMissed => String::new(),
        GameEvent::BallReset => String::new(),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a line back into timestamp and event
pub fn parse_event(line: &str) -> Option<(u32, GameEvent)> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let ts_str = parts[0].strip_prefix("T:")?;
    let time_ms: u32 = ts_str.parse().ok()?;

    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SE" if data.len() >= 2 => GameEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
        },
        "CF" => {
            // JSON may itself contain '|'
            let tuning: ShotTuning = serde_json::from_str(&data.join("|")).ok()?;
            GameEvent::Config(tuning)
        }
        "PW" => GameEvent::PowerChanged {
            power: data[0].parse().ok()?,
        },
        "SA" if data.len() >= 3 => GameEvent::ShotAttempted {
            side: parse_side(data[0])?,
            power: data[1].parse().ok()?,
            three_point: data[2] == "1",
        },
        "SM" if data.len() >= 3 => GameEvent::ShotMade {
            side: parse_side(data[0])?,
            points: data[1].parse().ok()?,
            three_point: data[2] == "1",
        },
        "SX" => GameEvent::ShotMissed,
        "RB" => GameEvent::BallReset,
        _ => return None,
    };

    Some((time_ms, event))
}

fn parse_side(s: &str) -> Option<Basket> {
    match s {
        "L" => Some(Basket::Left),
        "R" => Some(Basket::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_shot_made() {
        let event = GameEvent::ShotMade {
            side: Basket::Left,
            points: 3,
            three_point: true,
        };
        assert_eq!(serialize_event(2950, &event), "T:02950|SM|L|3|1");
    }

    #[test]
    fn test_serialize_unit_events_and_wrap() {
        assert_eq!(serialize_event(4100, &GameEvent::ShotMissed), "T:04100|SX|");
        assert_eq!(serialize_event(123_456, &GameEvent::BallReset), "T:23456|RB|");
    }

    #[test]
    fn test_parse_shot_attempted() {
        let (ts, event) = parse_event("T:01200|SA|R|55|0").unwrap();
        assert_eq!(ts, 1200);
        assert_eq!(
            event,
            GameEvent::ShotAttempted {
                side: Basket::Right,
                power: 55,
                three_point: false,
            }
        );
    }

    #[test]
    fn test_config_survives_text_format() {
        let tuning = ShotTuning {
            gravity: 12.5,
            ..Default::default()
        };
        let line = serialize_event(0, &GameEvent::Config(tuning.clone()));
        let (_, parsed) = parse_event(&line).unwrap();
        assert_eq!(parsed, GameEvent::Config(tuning));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_event("hello").is_none());
        assert!(parse_event("T:00010|ZZ|1").is_none());
        assert!(parse_event("T:00010|SM|Q|2|0").is_none());
    }
}
