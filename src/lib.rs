//! Hoopshot - single-player basketball shooting built with Bevy
//!
//! This crate provides the shot physics, make/miss detection, scoring and the
//! systems that drive them, organized into modules.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod events;
pub mod helpers;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod game;
pub mod input;
pub mod scoring;
pub mod shooting;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{BallPhase, BallSpin, BallState, StepReport, integrate_ball};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use events::{BusEvent, EventBus, GameEvent, SqliteEventLogger, serialize_event};
pub use game::{CommandOutcome, GameState, ShotEnginePlugin};
pub use helpers::*;
pub use input::{Direction, PlayerInput, ShotCommand};
pub use scoring::{OutcomeDetector, Score, ShotOutcome, SideStats};
pub use shooting::{
    AimReading, AttemptStatus, ShotAttempt, ShotPower, Sweetspot, ideal_power, launch_shot,
    read_aim, velocity_scale,
};
pub use tuning::ShotTuning;
pub use world::{Basket, nearest_basket};

use bevy::math::Vec3;

// =============================================================================
// ERRORS
// =============================================================================

/// Why a shot could not be taken
#[derive(Debug, Clone, PartialEq)]
pub enum ShotError {
    /// The ball is already flying; one shot at a time
    AlreadyInFlight,
    /// The arc peak is not above both the launch point and the rim
    DegenerateArc { peak: f32, launch: f32, target: f32 },
    /// Gravity must be positive for the arc to come back down
    InvalidGravity(f32),
}

impl std::fmt::Display for ShotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShotError::AlreadyInFlight => write!(f, "ball is already in flight"),
            ShotError::DegenerateArc {
                peak,
                launch,
                target,
            } => write!(
                f,
                "arc peak {:.2} must be above launch height {:.2} and target height {:.2}",
                peak, launch, target
            ),
            ShotError::InvalidGravity(g) => write!(f, "gravity must be positive, got {}", g),
        }
    }
}

impl std::error::Error for ShotError {}

// =============================================================================
// TRAJECTORY CALCULATION (shared with tools like heatmap generator)
// =============================================================================

/// Launch velocity that lands a ball on a target through a fixed-height peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchSolution {
    pub velocity: Vec3,
    /// Seconds from launch to reaching the target height on the way down
    pub flight_time: f32,
    /// Seconds from launch to the peak
    pub apex_time: f32,
}

/// Solve the launch velocity that carries a ball from `launch` to `target`
/// with its highest point at `peak_height`.
///
/// Vertical speed comes from `v² = 2g·(peak - launch.y)`. Total flight time is
/// the rise to the peak plus the free fall from the peak to the target
/// height, and the horizontal velocity covers the offset in that time.
pub fn solve_launch(
    launch: Vec3,
    target: Vec3,
    peak_height: f32,
    gravity: f32,
) -> Result<LaunchSolution, ShotError> {
    if gravity <= 0.0 {
        return Err(ShotError::InvalidGravity(gravity));
    }
    let rise = peak_height - launch.y;
    let fall = peak_height - target.y;
    if rise <= 0.0 || fall <= 0.0 {
        return Err(ShotError::DegenerateArc {
            peak: peak_height,
            launch: launch.y,
            target: target.y,
        });
    }

    let vertical = (2.0 * gravity * rise).sqrt();
    let apex_time = vertical / gravity;
    let fall_time = (2.0 * fall / gravity).sqrt();
    let flight_time = apex_time + fall_time;

    let offset = target - launch;
    Ok(LaunchSolution {
        velocity: Vec3::new(offset.x / flight_time, vertical, offset.z / flight_time),
        flight_time,
        apex_time,
    })
}
