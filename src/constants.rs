//! Tunable constants for hoopshot
//!
//! All gameplay values are defined here for easy tweaking. `ShotTuning`
//! uses them as defaults, so a config file only needs the values it changes.

use bevy::prelude::*;

// =============================================================================
// PHYSICS CONSTANTS
// =============================================================================

pub const GRAVITY: f32 = 9.8; // Downward acceleration (units/s²)
pub const MAX_FRAME_DT: f32 = 0.1; // Longest frame step integrated at once (seconds)

// =============================================================================
// COURT DIMENSIONS
// =============================================================================

pub const COURT_HALF_LENGTH: f32 = 15.0; // X extent from center court
pub const COURT_HALF_WIDTH: f32 = 7.5; // Z extent from center court
pub const FLOOR_OFFSET: f32 = 0.1; // Court surface sits this far above y = 0
pub const THREE_POINT_RADIUS: f32 = 6.75; // Shots from farther than this score 3

// =============================================================================
// HOOPS
// =============================================================================

pub const RIM_HEIGHT: f32 = 3.05;
pub const RIM_RADIUS: f32 = 0.225;
pub const RIM_X: f32 = 14.4; // Rims at ±RIM_X (backboard at ±15, rim 0.6 in front)
pub const ARC_PEAK_OFFSET: f32 = 2.5; // Shot apex height above the rim
pub const MADE_THRESHOLD_FACTOR: f32 = 1.1; // Ball center must pass within rim radius × this
pub const MADE_LATCH_CLEARANCE: f32 = 0.5; // Ball must rise this far above the rim to unlatch a make

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const BALL_RADIUS: f32 = 0.24;
pub const BALL_BOUNCE: f32 = 0.7; // Coefficient of restitution on the floor
pub const BALL_BOUNCE_DAMPING: f32 = 0.95; // Horizontal velocity retained per bounce
pub const BALL_BOUNCE_THRESHOLD: f32 = 0.8; // Below this vertical speed the ball stops

// =============================================================================
// SHOOTING
// =============================================================================

pub const MIN_POWER: u8 = 0;
pub const MAX_POWER: u8 = 100;
pub const DEFAULT_POWER: u8 = 50;
pub const POWER_STEP: u8 = 5; // Power change per key press
pub const MIN_IDEAL_POWER: f32 = 30.0; // Ideal power right under the rim
pub const MAX_IDEAL_POWER: f32 = 100.0; // Ideal power at MAX_REFERENCE_DISTANCE
pub const MIN_REFERENCE_DISTANCE: f32 = 0.0;
pub const MAX_REFERENCE_DISTANCE: f32 = 15.0; // Court half-length
pub const SWEETSPOT_HALF_WIDTH: f32 = 7.0; // Sweetspot = ideal ± this
pub const UNDERSHOOT_BASE_SCALE: f32 = 0.85; // Velocity scale at zero power
pub const OVERSHOOT_MAX_BONUS: f32 = 0.5; // Extra velocity scale at full power past the sweetspot

// =============================================================================
// MOVEMENT
// =============================================================================

pub const MOVE_STEP: f32 = 0.5; // Ball displacement per move key press

// =============================================================================
// FILES
// =============================================================================

pub const SHOT_TUNING_FILE: &str = "config/shot_tuning.json";
pub const EVENT_DB_FILE: &str = "db/hoopshot.db";

// =============================================================================
// UI
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.12, 0.1, 0.09);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8); // Cream
pub const TEXT_SECONDARY: Color = Color::srgb(0.7, 0.65, 0.55); // Parchment
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4); // Gold, used for "Perfect!"
pub const GAUGE_CELLS: usize = 20; // Characters in the text power gauge
