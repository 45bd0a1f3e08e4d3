//! Court geometry: hoop positions and the playable bounds

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::helpers::horizontal_distance;
use crate::tuning::ShotTuning;

/// One of the two hoops. Also names the half of the court the hoop sits in,
/// which is the side credited for shots at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basket {
    Left,
    Right,
}

impl Basket {
    /// Left first, so nearest-hoop ties resolve to the left hoop
    pub const ALL: [Basket; 2] = [Basket::Left, Basket::Right];

    /// World position of the rim center
    pub fn rim_center(self, tuning: &ShotTuning) -> Vec3 {
        let x = match self {
            Basket::Left => -tuning.rim_x,
            Basket::Right => tuning.rim_x,
        };
        Vec3::new(x, tuning.rim_height, 0.0)
    }

    /// Hoop whose half of the court contains `x` (center line goes left)
    pub fn for_half(x: f32) -> Basket {
        if x > 0.0 { Basket::Right } else { Basket::Left }
    }

    pub fn name(self) -> &'static str {
        match self {
            Basket::Left => "left",
            Basket::Right => "right",
        }
    }
}

impl std::fmt::Display for Basket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Basket::Left => write!(f, "L"),
            Basket::Right => write!(f, "R"),
        }
    }
}

/// Closest hoop to `position` in the court plane, with its horizontal distance.
/// Ties go to the left hoop.
pub fn nearest_basket(position: Vec3, tuning: &ShotTuning) -> (Basket, f32) {
    let mut best = (Basket::Left, f32::INFINITY);
    for basket in Basket::ALL {
        let distance = horizontal_distance(position, basket.rim_center(tuning));
        if distance < best.1 {
            best = (basket, distance);
        }
    }
    best
}

/// Clamp a ball center to the court so the ball never leaves the floor area.
/// Only X and Z are touched.
pub fn clamp_to_court(position: &mut Vec3, tuning: &ShotTuning) {
    let max_x = tuning.court_half_length - tuning.ball_radius;
    let max_z = tuning.court_half_width - tuning.ball_radius;
    position.x = position.x.clamp(-max_x, max_x);
    position.z = position.z.clamp(-max_z, max_z);
}

/// Resting spot at center court
pub fn center_court(tuning: &ShotTuning) -> Vec3 {
    Vec3::new(0.0, tuning.floor_height(), 0.0)
}
