//! Shooting module - aim/power model, launch, and the attempt record

mod attempt;
mod power;
mod throw;

pub use attempt::*;
pub use power::*;
pub use throw::*;
