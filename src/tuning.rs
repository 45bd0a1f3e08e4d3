//! Shot tuning settings (physics constants that can be overridden from config)

use bevy::log::{info, warn};
use bevy::prelude::{ResMut, Resource};
use serde::{Deserialize, Serialize};

use crate::constants::*;

// Serde default functions so partial config files keep working
fn default_gravity() -> f32 {
    GRAVITY
}
fn default_rim_height() -> f32 {
    RIM_HEIGHT
}
fn default_rim_radius() -> f32 {
    RIM_RADIUS
}
fn default_rim_x() -> f32 {
    RIM_X
}
fn default_arc_peak_offset() -> f32 {
    ARC_PEAK_OFFSET
}
fn default_ball_radius() -> f32 {
    BALL_RADIUS
}
fn default_floor_offset() -> f32 {
    FLOOR_OFFSET
}
fn default_ball_bounce() -> f32 {
    BALL_BOUNCE
}
fn default_ball_bounce_damping() -> f32 {
    BALL_BOUNCE_DAMPING
}
fn default_ball_bounce_threshold() -> f32 {
    BALL_BOUNCE_THRESHOLD
}
fn default_sweetspot_half_width() -> f32 {
    SWEETSPOT_HALF_WIDTH
}
fn default_min_ideal_power() -> f32 {
    MIN_IDEAL_POWER
}
fn default_max_ideal_power() -> f32 {
    MAX_IDEAL_POWER
}
fn default_min_reference_distance() -> f32 {
    MIN_REFERENCE_DISTANCE
}
fn default_max_reference_distance() -> f32 {
    MAX_REFERENCE_DISTANCE
}
fn default_made_threshold_factor() -> f32 {
    MADE_THRESHOLD_FACTOR
}
fn default_made_latch_clearance() -> f32 {
    MADE_LATCH_CLEARANCE
}
fn default_three_point_radius() -> f32 {
    THREE_POINT_RADIUS
}
fn default_court_half_length() -> f32 {
    COURT_HALF_LENGTH
}
fn default_court_half_width() -> f32 {
    COURT_HALF_WIDTH
}
fn default_power_step() -> u8 {
    POWER_STEP
}
fn default_default_power() -> u8 {
    DEFAULT_POWER
}
fn default_move_step() -> f32 {
    MOVE_STEP
}

/// Physics and scoring values used by the shot engine.
///
/// Stored as JSON in [`SHOT_TUNING_FILE`]. Every field has a serde default,
/// so `{}` is a valid file.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTuning {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_rim_height")]
    pub rim_height: f32,
    #[serde(default = "default_rim_radius")]
    pub rim_radius: f32,
    #[serde(default = "default_rim_x")]
    pub rim_x: f32,
    #[serde(default = "default_arc_peak_offset")]
    pub arc_peak_offset: f32,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f32,
    #[serde(default = "default_floor_offset")]
    pub floor_offset: f32,
    #[serde(default = "default_ball_bounce")]
    pub ball_bounce: f32,
    #[serde(default = "default_ball_bounce_damping")]
    pub ball_bounce_damping: f32,
    #[serde(default = "default_ball_bounce_threshold")]
    pub ball_bounce_threshold: f32,
    #[serde(default = "default_sweetspot_half_width")]
    pub sweetspot_half_width: f32,
    #[serde(default = "default_min_ideal_power")]
    pub min_ideal_power: f32,
    #[serde(default = "default_max_ideal_power")]
    pub max_ideal_power: f32,
    #[serde(default = "default_min_reference_distance")]
    pub min_reference_distance: f32,
    #[serde(default = "default_max_reference_distance")]
    pub max_reference_distance: f32,
    #[serde(default = "default_made_threshold_factor")]
    pub made_threshold_factor: f32,
    #[serde(default = "default_made_latch_clearance")]
    pub made_latch_clearance: f32,
    #[serde(default = "default_three_point_radius")]
    pub three_point_radius: f32,
    #[serde(default = "default_court_half_length")]
    pub court_half_length: f32,
    #[serde(default = "default_court_half_width")]
    pub court_half_width: f32,
    #[serde(default = "default_power_step")]
    pub power_step: u8,
    #[serde(default = "default_default_power")]
    pub default_power: u8,
    #[serde(default = "default_move_step")]
    pub move_step: f32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            rim_height: RIM_HEIGHT,
            rim_radius: RIM_RADIUS,
            rim_x: RIM_X,
            arc_peak_offset: ARC_PEAK_OFFSET,
            ball_radius: BALL_RADIUS,
            floor_offset: FLOOR_OFFSET,
            ball_bounce: BALL_BOUNCE,
            ball_bounce_damping: BALL_BOUNCE_DAMPING,
            ball_bounce_threshold: BALL_BOUNCE_THRESHOLD,
            sweetspot_half_width: SWEETSPOT_HALF_WIDTH,
            min_ideal_power: MIN_IDEAL_POWER,
            max_ideal_power: MAX_IDEAL_POWER,
            min_reference_distance: MIN_REFERENCE_DISTANCE,
            max_reference_distance: MAX_REFERENCE_DISTANCE,
            made_threshold_factor: MADE_THRESHOLD_FACTOR,
            made_latch_clearance: MADE_LATCH_CLEARANCE,
            three_point_radius: THREE_POINT_RADIUS,
            court_half_length: COURT_HALF_LENGTH,
            court_half_width: COURT_HALF_WIDTH,
            power_step: POWER_STEP,
            default_power: DEFAULT_POWER,
            move_step: MOVE_STEP,
        }
    }
}

impl ShotTuning {
    /// Height of the ball center when resting on the court
    pub fn floor_height(&self) -> f32 {
        self.ball_radius + self.floor_offset
    }

    /// Apex height every shot is aimed through
    pub fn peak_height(&self) -> f32 {
        self.rim_height + self.arc_peak_offset
    }

    /// Horizontal distance from a rim center that still counts as through the hoop
    pub fn made_threshold(&self) -> f32 {
        self.rim_radius * self.made_threshold_factor
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err("gravity must be finite and > 0".to_string());
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err("ball_radius must be finite and > 0".to_string());
        }
        if !self.rim_radius.is_finite() || self.rim_radius <= 0.0 {
            return Err("rim_radius must be finite and > 0".to_string());
        }
        if !self.arc_peak_offset.is_finite() || self.arc_peak_offset <= 0.0 {
            return Err("arc_peak_offset must be finite and > 0".to_string());
        }
        if self.peak_height() <= self.floor_height() {
            return Err(format!(
                "arc peak {:.2} must be above the launch height {:.2}",
                self.peak_height(),
                self.floor_height()
            ));
        }
        if self.rim_height <= self.floor_height() {
            return Err("rim_height must be above the resting ball".to_string());
        }
        if self.court_half_length <= self.ball_radius || self.court_half_width <= self.ball_radius {
            return Err("court must be larger than the ball".to_string());
        }
        if self.rim_x.abs() >= self.court_half_length {
            return Err("rim_x must lie inside the court".to_string());
        }
        if !(0.0..1.0).contains(&self.ball_bounce) {
            return Err("ball_bounce must be in [0, 1)".to_string());
        }
        if !(0.0..=1.0).contains(&self.ball_bounce_damping) {
            return Err("ball_bounce_damping must be in [0, 1]".to_string());
        }
        if self.ball_bounce_threshold < 0.0 {
            return Err("ball_bounce_threshold must be >= 0".to_string());
        }
        if self.max_reference_distance <= self.min_reference_distance {
            return Err("max_reference_distance must be > min_reference_distance".to_string());
        }
        if self.max_ideal_power < self.min_ideal_power
            || self.min_ideal_power < MIN_POWER as f32
            || self.max_ideal_power > MAX_POWER as f32
        {
            return Err("ideal power range must satisfy 0 <= min <= max <= 100".to_string());
        }
        if self.sweetspot_half_width < 0.0 {
            return Err("sweetspot_half_width must be >= 0".to_string());
        }
        if self.default_power > MAX_POWER {
            return Err("default_power must be <= 100".to_string());
        }
        if self.power_step == 0 {
            return Err("power_step must be > 0".to_string());
        }
        Ok(())
    }
}

pub fn load_shot_tuning_from_file(path: &str) -> Result<ShotTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let tuning: ShotTuning =
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))?;
    tuning
        .validate()
        .map_err(|e| format!("Invalid tuning in {}: {}", path, e))?;
    Ok(tuning)
}

/// Load tuning from `path`, falling back to defaults on any error.
/// The error is returned alongside so callers can report it.
pub fn load_shot_tuning_or_default(path: &str) -> (ShotTuning, Option<String>) {
    match load_shot_tuning_from_file(path) {
        Ok(tuning) => (tuning, None),
        Err(err) => (ShotTuning::default(), Some(err)),
    }
}

pub fn load_shot_tuning_system(mut tuning: ResMut<ShotTuning>) {
    let (loaded, err) = load_shot_tuning_or_default(SHOT_TUNING_FILE);
    match err {
        Some(err) => warn!("{}, using defaults", err),
        None => info!("Loaded shot tuning from {}", SHOT_TUNING_FILE),
    }
    *tuning = loaded;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ShotTuning::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let tuning: ShotTuning = serde_json::from_str("{}").unwrap();
        assert_eq!(tuning, ShotTuning::default());
    }

    #[test]
    fn test_partial_json_overrides_field() {
        let tuning: ShotTuning = serde_json::from_str(r#"{ "gravity": 12.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 12.0);
        assert_eq!(tuning.rim_height, RIM_HEIGHT);
    }

    #[test]
    fn test_rejects_non_positive_peak_offset() {
        let tuning = ShotTuning {
            arc_peak_offset: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_peak_below_launch() {
        let tuning = ShotTuning {
            rim_height: 0.2,
            arc_peak_offset: 0.05,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let (tuning, err) = load_shot_tuning_or_default("config/does_not_exist.json");
        assert_eq!(tuning, ShotTuning::default());
        assert!(err.is_some());
    }
}
