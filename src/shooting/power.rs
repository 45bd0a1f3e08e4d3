//! Aim/power model: ideal power by distance, sweetspot window, velocity scale
//!
//! Shared by the HUD gauge and the launch computation so both always agree
//! on what "perfect" means for the current spot.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_POWER, MIN_POWER, OVERSHOOT_MAX_BONUS, UNDERSHOOT_BASE_SCALE};
use crate::helpers::inverse_lerp_clamped;
use crate::tuning::ShotTuning;
use crate::world::{Basket, nearest_basket};

/// Player-chosen shot power, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShotPower(u8);

impl ShotPower {
    /// Clamp any integer into the valid range
    pub fn new(value: i32) -> Self {
        Self(value.clamp(MIN_POWER as i32, MAX_POWER as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }

    pub fn raised(self, step: u8) -> Self {
        Self::new(self.0 as i32 + step as i32)
    }

    pub fn lowered(self, step: u8) -> Self {
        Self::new(self.0 as i32 - step as i32)
    }
}

impl Default for ShotPower {
    fn default() -> Self {
        Self(crate::constants::DEFAULT_POWER)
    }
}

impl std::fmt::Display for ShotPower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Power window within which a shot is unpenalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweetspot {
    pub start: f32,
    pub end: f32,
}

impl Sweetspot {
    /// `ideal ± half_width`, clamped to the power range
    pub fn around(ideal: f32, half_width: f32) -> Self {
        let min = MIN_POWER as f32;
        let max = MAX_POWER as f32;
        Self {
            start: (ideal - half_width).clamp(min, max),
            end: (ideal + half_width).clamp(min, max),
        }
    }

    pub fn contains(&self, power: ShotPower) -> bool {
        let p = power.as_f32();
        p >= self.start && p <= self.end
    }
}

/// Power an expert would use from `distance` away from the rim
pub fn ideal_power(distance: f32, tuning: &ShotTuning) -> f32 {
    let t = inverse_lerp_clamped(
        tuning.min_reference_distance,
        tuning.max_reference_distance,
        distance,
    );
    let ideal = tuning.min_ideal_power + (tuning.max_ideal_power - tuning.min_ideal_power) * t;
    ideal.clamp(tuning.min_ideal_power, tuning.max_ideal_power)
}

/// Launch velocity multiplier for `power` given the sweetspot.
///
/// Undershooting shrinks the launch toward 0.85×, overshooting grows it up
/// to 1.5×. Inside the window the scale is exactly 1.
pub fn velocity_scale(power: ShotPower, sweetspot: Sweetspot) -> f32 {
    let p = power.as_f32();
    let max = MAX_POWER as f32;

    if p < sweetspot.start {
        // start > p >= 0 here, so start is positive; keep the guard for hand-built windows
        if sweetspot.start <= 0.0 {
            return 1.0;
        }
        UNDERSHOOT_BASE_SCALE + (1.0 - UNDERSHOOT_BASE_SCALE) * (p / sweetspot.start)
    } else if p > sweetspot.end {
        if sweetspot.end >= max {
            return 1.0;
        }
        1.0 + OVERSHOOT_MAX_BONUS * ((p - sweetspot.end) / (max - sweetspot.end))
    } else {
        1.0
    }
}

/// Everything the gauge and the launch need to know about the current aim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimReading {
    pub basket: Basket,
    /// Horizontal distance to the target rim center
    pub distance: f32,
    pub ideal_power: f32,
    pub sweetspot: Sweetspot,
    pub power: ShotPower,
    pub scale: f32,
    /// Power inside the sweetspot
    pub perfect: bool,
}

/// Evaluate the aim model for a ball at `position` with the chosen `power`
pub fn read_aim(position: Vec3, power: ShotPower, tuning: &ShotTuning) -> AimReading {
    let (basket, distance) = nearest_basket(position, tuning);
    let ideal = ideal_power(distance, tuning);
    let sweetspot = Sweetspot::around(ideal, tuning.sweetspot_half_width);
    AimReading {
        basket,
        distance,
        ideal_power: ideal,
        sweetspot,
        power,
        scale: velocity_scale(power, sweetspot),
        perfect: sweetspot.contains(power),
    }
}
