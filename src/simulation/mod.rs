//! Shot simulation module - headless make-rate sweeps
//!
//! Runs shots from many court spots without rendering and aggregates the
//! results by distance, for tuning the aim model.

pub mod config;
pub mod metrics;
pub mod runner;
pub mod sweep;

pub use config::{PowerSetting, SweepConfig, SweepMode};
pub use metrics::{DistanceBand, PowerSummary, SweepSummary, summarize, summarize_setting};
pub use runner::run_simulation;
pub use sweep::{
    SWEEP_DT, ShotSample, grid_spots, init_parallel, random_spots, run_sweep, simulate_shot,
    sweep_spots,
};
