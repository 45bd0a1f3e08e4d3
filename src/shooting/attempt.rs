//! Shot attempt record (lives from launch until the shot is resolved)

use bevy::prelude::*;

use crate::shooting::{ShotPower, Sweetspot};
use crate::world::Basket;

/// Progress of a live attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttemptStatus {
    /// Rising toward the apex
    #[default]
    Pending,
    /// Past the apex, waiting for the rim crossing
    Peaked,
}

/// Everything recorded about a shot at launch time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotAttempt {
    pub power: ShotPower,
    pub sweetspot: Sweetspot,
    pub launch_position: Vec3,
    pub target: Basket,
    pub target_position: Vec3,
    pub three_point: bool,
    pub status: AttemptStatus,
}

impl ShotAttempt {
    pub fn peaked(&self) -> bool {
        self.status == AttemptStatus::Peaked
    }

    pub fn mark_peaked(&mut self) {
        self.status = AttemptStatus::Peaked;
    }

    /// Launch power was inside the window recorded at launch
    pub fn power_in_sweetspot(&self) -> bool {
        self.sweetspot.contains(self.power)
    }

    pub fn points(&self) -> u32 {
        if self.three_point { 3 } else { 2 }
    }
}
