//! Heatmap generator for shot outcomes
//!
//! Shoots once from every grid spot of the court (top-down view, X across,
//! Z down) and paints the result:
//! - bright green: three-pointer made
//! - green: two-pointer made
//! - red: miss (darker outside the sweetspot)
//!
//! Rims and three-point arcs are drawn on top.
//!
//! Usage:
//!   cargo run --bin heatmap                     # Ideal power everywhere
//!   cargo run --bin heatmap -- --power 60       # Fixed power
//!   cargo run --bin heatmap -- --spacing 0.25 --output court.png
//!
//! Outputs land in showcase/heatmaps as:
//!   heatmap_<power>.png
//!   heatmap_<power>.txt (x,z,power,made,points)

use std::fmt::Write as FmtWrite;
use std::fs;

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use hoopshot::simulation::{PowerSetting, ShotSample, grid_spots, run_sweep};
use hoopshot::tuning::load_shot_tuning_or_default;
use hoopshot::{Basket, SHOT_TUNING_FILE, ShotTuning};

/// Pixels per world unit
const SCALE: f32 = 20.0;
const OUTPUT_DIR: &str = "showcase/heatmaps";

const BG_COLOR: Rgb<u8> = Rgb([230, 230, 230]);
const THREE_COLOR: Rgb<u8> = Rgb([40, 200, 60]);
const TWO_COLOR: Rgb<u8> = Rgb([140, 220, 120]);
const MISS_COLOR: Rgb<u8> = Rgb([220, 90, 70]);
const MISS_OFF_COLOR: Rgb<u8> = Rgb([150, 50, 40]);
const LINE_COLOR: Rgb<u8> = Rgb([50, 50, 50]);
const RIM_COLOR: Rgb<u8> = Rgb([230, 120, 30]);

struct HeatmapConfig {
    power: PowerSetting,
    spacing: f32,
    output: Option<String>,
    tuning_file: String,
}

fn parse_args() -> HeatmapConfig {
    let mut config = HeatmapConfig {
        power: PowerSetting::Ideal,
        spacing: 0.5,
        output: None,
        tuning_file: SHOT_TUNING_FILE.to_string(),
    };
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--power" => {
                if i + 1 < args.len() {
                    match PowerSetting::parse(&args[i + 1]) {
                        Some(power) => config.power = power,
                        None => eprintln!("Warning: invalid power '{}', using ideal", args[i + 1]),
                    }
                    i += 1;
                }
            }
            "--spacing" => {
                if i + 1 < args.len() {
                    config.spacing = args[i + 1].parse().unwrap_or(0.5);
                    i += 1;
                }
            }
            "--output" => {
                if i + 1 < args.len() {
                    config.output = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--tuning" => {
                if i + 1 < args.len() {
                    config.tuning_file = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!(
                    "USAGE:\n    cargo run --bin heatmap -- [--power ideal|0-100] [--spacing UNITS] [--output FILE] [--tuning FILE]"
                );
                std::process::exit(0);
            }
            other => eprintln!("Warning: ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    config
}

fn main() {
    let config = parse_args();

    let (tuning, err) = load_shot_tuning_or_default(&config.tuning_file);
    if let Some(err) = err {
        eprintln!("Warning: {}, using default tuning", err);
    }

    let spots = grid_spots(&tuning, config.spacing);
    if spots.is_empty() {
        eprintln!("Error: spacing must be positive");
        std::process::exit(1);
    }

    println!(
        "Shooting from {} spots at power {}...",
        spots.len(),
        config.power.label()
    );
    let samples = match run_sweep(&spots, &[config.power], &tuning) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base_name = format!("heatmap_{}", config.power.label());
    let image_path = config
        .output
        .clone()
        .unwrap_or_else(|| format!("{}/{}.png", OUTPUT_DIR, base_name));
    let data_path = format!("{}/{}.txt", OUTPUT_DIR, base_name);

    if let Err(e) = fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("Error: failed to create {}: {}", OUTPUT_DIR, e);
        std::process::exit(1);
    }

    let img = render(&samples, &tuning, config.spacing);
    if let Err(e) = img.save(&image_path) {
        eprintln!("Error: failed to save {}: {}", image_path, e);
        std::process::exit(1);
    }
    if let Err(e) = fs::write(&data_path, sample_data(&samples)) {
        eprintln!("Error: failed to write {}: {}", data_path, e);
        std::process::exit(1);
    }

    let makes = samples.iter().filter(|s| s.made).count();
    println!(
        "Made {}/{} ({:.1}%)",
        makes,
        samples.len(),
        makes as f32 / samples.len() as f32 * 100.0
    );
    println!("Saved {} and {}", image_path, data_path);
}

/// World (x, z) to pixel coordinates
fn to_pixel(x: f32, z: f32, tuning: &ShotTuning) -> (f32, f32) {
    (
        (x + tuning.court_half_length) * SCALE,
        (z + tuning.court_half_width) * SCALE,
    )
}

fn sample_color(sample: &ShotSample) -> Rgb<u8> {
    match (sample.made, sample.three_point, sample.in_sweetspot) {
        (true, true, _) => THREE_COLOR,
        (true, false, _) => TWO_COLOR,
        (false, _, true) => MISS_COLOR,
        (false, _, false) => MISS_OFF_COLOR,
    }
}

fn render(samples: &[ShotSample], tuning: &ShotTuning, spacing: f32) -> RgbImage {
    let width = (tuning.court_half_length * 2.0 * SCALE) as u32;
    let height = (tuning.court_half_width * 2.0 * SCALE) as u32;
    let mut img = RgbImage::from_pixel(width, height, BG_COLOR);

    let cell = (spacing * SCALE).max(1.0);
    for sample in samples {
        let (px, py) = to_pixel(sample.x, sample.z, tuning);
        let rect = Rect::at((px - cell / 2.0) as i32, (py - cell / 2.0) as i32)
            .of_size(cell as u32, cell as u32);
        draw_filled_rect_mut(&mut img, rect, sample_color(sample));
    }

    // Center line
    let (cx, _) = to_pixel(0.0, 0.0, tuning);
    draw_line_segment_mut(&mut img, (cx, 0.0), (cx, height as f32), LINE_COLOR);

    for basket in Basket::ALL {
        let rim = basket.rim_center(tuning);
        let (rx, ry) = to_pixel(rim.x, rim.z, tuning);
        let center = (rx as i32, ry as i32);
        draw_hollow_circle_mut(
            &mut img,
            center,
            (tuning.three_point_radius * SCALE) as i32,
            LINE_COLOR,
        );
        draw_filled_circle_mut(
            &mut img,
            center,
            (tuning.rim_radius * SCALE).max(2.0) as i32,
            RIM_COLOR,
        );
    }

    img
}

fn sample_data(samples: &[ShotSample]) -> String {
    let mut data = String::from("x,z,power,made,points\n");
    for sample in samples {
        let _ = writeln!(
            &mut data,
            "{:.2},{:.2},{},{},{}",
            sample.x, sample.z, sample.power, sample.made as u8, sample.points
        );
    }
    data
}
