//! Utility functions for hoopshot

use bevy::prelude::*;

/// Project a world position onto the court plane (X/Z)
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Distance between two points ignoring height
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a).distance(horizontal(b))
}

/// Position of `value` between `min` and `max` as a 0..=1 fraction
pub fn inverse_lerp_clamped(min: f32, max: f32, value: f32) -> f32 {
    if max <= min {
        return if value >= max { 1.0 } else { 0.0 };
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
