//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::tuning::ShotTuning;
use crate::world::Basket;

/// Everything the shot engine reports to the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },
    /// Tuning snapshot (logged after session start and on hot reload)
    Config(ShotTuning),

    // === Shot Events ===
    /// Chosen power changed
    PowerChanged { power: u8 },
    /// Ball launched at `side`'s rim
    ShotAttempted {
        side: Basket,
        power: u8,
        three_point: bool,
    },
    /// Ball went through the rim on `side`
    ShotMade {
        side: Basket,
        points: u32,
        three_point: bool,
    },
    /// Live attempt resolved without a make
    ShotMissed,

    // === Ball Events ===
    /// Ball returned to center court
    BallReset,
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::PowerChanged { .. } => "PW",
            GameEvent::ShotAttempted { .. } => "SA",
            GameEvent::ShotMade { .. } => "SM",
            GameEvent::ShotMissed => "SX",
            GameEvent::BallReset => "RB",
        }
    }
}
