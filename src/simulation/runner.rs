//! Sweep entry point shared by the `simulate` binary

use std::time::Instant;

use crate::tuning::{ShotTuning, load_shot_tuning_from_file};

use super::config::SweepConfig;
use super::metrics::{SweepSummary, summarize};
use super::sweep::{init_parallel, run_sweep, sweep_spots};

/// Run a full sweep: load tuning, shoot, summarize, report
pub fn run_simulation(config: SweepConfig) -> Result<SweepSummary, String> {
    let tuning = match load_shot_tuning_from_file(&config.tuning_file) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("Warning: {}, using default tuning", e);
            ShotTuning::default()
        }
    };

    init_parallel(config.parallel)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let spots = sweep_spots(&config, &tuning, seed);
    if spots.is_empty() {
        return Err("Sweep has no spots to shoot from".to_string());
    }

    if !config.quiet {
        println!(
            "Shooting from {} spots at {} power setting(s) (seed {})...",
            spots.len(),
            config.powers.len(),
            seed
        );
    }

    let started = Instant::now();
    let samples = run_sweep(&spots, &config.powers, &tuning).map_err(|e| e.to_string())?;
    let summary = summarize(&samples, &config.powers, spots.len(), config.band_width, seed);

    if !config.quiet {
        println!(
            "{} shots in {:.2}s",
            samples.len(),
            started.elapsed().as_secs_f32()
        );
    }
    println!("{}", summary.format_table());

    if let Some(path) = &config.output_file {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("Failed to serialize summary: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        if !config.quiet {
            println!("Summary written to {}", path);
        }
    }

    Ok(summary)
}
