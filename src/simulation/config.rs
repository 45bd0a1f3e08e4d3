//! Sweep configuration

use serde::{Deserialize, Serialize};

use crate::constants::SHOT_TUNING_FILE;

/// Which ball spots a sweep shoots from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SweepMode {
    /// Every `spacing` units across the court
    Grid { spacing: f32 },
    /// Uniformly random spots (seeded)
    Random { samples: u32 },
}

impl Default for SweepMode {
    fn default() -> Self {
        SweepMode::Grid { spacing: 0.5 }
    }
}

/// Power used for every shot of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerSetting {
    /// The spot's ideal power, rounded
    Ideal,
    Fixed(u8),
}

impl PowerSetting {
    /// "ideal" or a number in 0..=100
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("ideal") {
            return Some(PowerSetting::Ideal);
        }
        s.parse::<u8>()
            .ok()
            .filter(|p| *p <= 100)
            .map(PowerSetting::Fixed)
    }

    pub fn label(self) -> String {
        match self {
            PowerSetting::Ideal => "ideal".to_string(),
            PowerSetting::Fixed(p) => p.to_string(),
        }
    }
}

/// Configuration for a sweep run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub mode: SweepMode,
    /// One full pass over the spots per entry
    pub powers: Vec<PowerSetting>,
    /// RNG seed for random spots (None = random)
    pub seed: Option<u64>,
    /// Width of the distance bands in the report
    pub band_width: f32,
    /// Number of parallel threads (0 = rayon default)
    pub parallel: usize,
    /// Shot tuning file
    pub tuning_file: String,
    /// Output JSON file (None = text report only)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            mode: SweepMode::default(),
            powers: vec![PowerSetting::Ideal],
            seed: None,
            band_width: 1.5,
            parallel: 0,
            tuning_file: SHOT_TUNING_FILE.to_string(),
            output_file: None,
            quiet: false,
        }
    }
}

impl SweepConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_arg_list(&args)
    }

    /// Parse an argument list (first entry is the program name).
    /// `--settings` is applied first; other flags override it.
    pub fn from_arg_list(args: &[String]) -> Self {
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            if args[i] == "--settings" && i + 1 < args.len() {
                match Self::from_file(&args[i + 1]) {
                    Ok(loaded) => config = loaded,
                    Err(e) => {
                        eprintln!("Warning: {}", e);
                    }
                }
                break;
            }
            i += 1;
        }

        i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--settings" => {
                    // Already handled above
                    i += 1;
                }
                "--grid" => {
                    let spacing = if i + 1 < args.len() && !args[i + 1].starts_with('-') {
                        i += 1;
                        args[i].parse().unwrap_or(0.5)
                    } else {
                        0.5
                    };
                    config.mode = SweepMode::Grid { spacing };
                }
                "--random" => {
                    let samples = if i + 1 < args.len() && !args[i + 1].starts_with('-') {
                        i += 1;
                        args[i].parse().unwrap_or(1000)
                    } else {
                        1000
                    };
                    config.mode = SweepMode::Random { samples };
                }
                "--powers" => {
                    if i + 1 < args.len() {
                        let powers: Vec<PowerSetting> =
                            args[i + 1].split(',').filter_map(PowerSetting::parse).collect();
                        if powers.is_empty() {
                            eprintln!("Warning: no valid powers in '{}'", args[i + 1]);
                        } else {
                            config.powers = powers;
                        }
                        i += 1;
                    }
                }
                "--seed" => {
                    if i + 1 < args.len() {
                        config.seed = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--band" => {
                    if i + 1 < args.len() {
                        config.band_width = args[i + 1].parse().unwrap_or(1.5);
                        i += 1;
                    }
                }
                "--parallel" => {
                    if i + 1 < args.len() {
                        config.parallel = args[i + 1].parse().unwrap_or(0);
                        i += 1;
                    }
                }
                "--tuning" => {
                    if i + 1 < args.len() {
                        config.tuning_file = args[i + 1].clone();
                        i += 1;
                    }
                }
                "--output" => {
                    if i + 1 < args.len() {
                        config.output_file = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Shot Sweep - headless make-rate sweep over the court

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>   Load settings from JSON file (CLI args override file settings)
    --grid [SPACING]    Shoot from a grid of spots (default spacing: 0.5)
    --random [N]        Shoot from N random spots (default: 1000)
    --powers <LIST>     Comma-separated powers, "ideal" or 0-100 (default: ideal)
    --seed <N>          RNG seed for random spots
    --band <WIDTH>      Distance band width in the report (default: 1.5)
    --parallel <N>      Run shots on N threads (default: rayon auto)
    --tuning <FILE>     Shot tuning JSON (default: config/shot_tuning.json)
    --output <FILE>     Write the summary as JSON
    --quiet, -q         Suppress progress output
    --help, -h          Show this help

EXAMPLES:
    # Ideal power from every half unit of the court
    cargo run --bin simulate -- --grid 0.5

    # Settings file
    cargo run --bin simulate -- --settings config/simulation_settings.template.json

    # Compare fixed powers from 5000 random spots
    cargo run --bin simulate -- --random 5000 --seed 7 --powers ideal,40,60,80
"#
    );
}
