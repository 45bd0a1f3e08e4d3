//! Ball module - state and per-frame physics

mod components;
mod physics;

pub use components::*;
pub use physics::*;
