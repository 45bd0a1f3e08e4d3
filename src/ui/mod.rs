//! UI module - HUD text and power gauge

mod hud;
mod power_gauge;

pub use hud::*;
pub use power_gauge::*;
