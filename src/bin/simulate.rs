//! Shot Sweep Tool - headless make-rate sweep over the court
//!
//! Fires shots from a grid (or random spots) without rendering and reports
//! the make rate per distance band.
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --grid 0.5
//!   cargo run --bin simulate -- --random 5000 --seed 7 --powers ideal,40,60

use hoopshot::simulation::{SweepConfig, run_simulation};

fn main() {
    let config = SweepConfig::from_args();
    if let Err(e) = run_simulation(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
