//! Headless shot sweeps
//!
//! Every shot runs in its own `GameState` with a disabled event bus, stepped
//! at a fixed 60 Hz until the attempt resolves. Shots share nothing, so
//! rayon spreads them over the pool freely.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::ShotError;
use crate::events::EventBus;
use crate::game::GameState;
use crate::input::ShotCommand;
use crate::scoring::ShotOutcome;
use crate::shooting::ShotPower;
use crate::tuning::ShotTuning;
use crate::world::Basket;

use super::config::{PowerSetting, SweepConfig, SweepMode};

/// Fixed step for sweep shots (seconds)
pub const SWEEP_DT: f32 = 1.0 / 60.0;

/// A shot still unresolved after this many frames counts as a miss
const MAX_SHOT_FRAMES: u64 = 1800;

/// One simulated shot
#[derive(Debug, Clone, Serialize)]
pub struct ShotSample {
    pub x: f32,
    pub z: f32,
    pub target: Basket,
    /// Horizontal distance to the target rim at launch
    pub distance: f32,
    pub setting: PowerSetting,
    pub power: u8,
    pub in_sweetspot: bool,
    pub three_point: bool,
    pub made: bool,
    pub points: u32,
    /// Frames until the attempt resolved
    pub frames: u64,
}

/// Initialize the global rayon pool. 0 keeps rayon's default size.
/// Call once at startup, before any sweep.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to initialize thread pool: {}", e))?;
    }
    Ok(())
}

fn court_limits(tuning: &ShotTuning) -> (f32, f32) {
    (
        tuning.court_half_length - tuning.ball_radius,
        tuning.court_half_width - tuning.ball_radius,
    )
}

/// Grid of spots centered on center court, `spacing` apart, inside the
/// reachable court area
pub fn grid_spots(tuning: &ShotTuning, spacing: f32) -> Vec<Vec2> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }
    let (max_x, max_z) = court_limits(tuning);
    let nx = (max_x / spacing).floor() as i32;
    let nz = (max_z / spacing).floor() as i32;

    let mut spots = Vec::with_capacity(((2 * nx + 1) * (2 * nz + 1)) as usize);
    for ix in -nx..=nx {
        for iz in -nz..=nz {
            spots.push(Vec2::new(ix as f32 * spacing, iz as f32 * spacing));
        }
    }
    spots
}

/// `count` uniformly random spots; the same seed gives the same spots
pub fn random_spots(tuning: &ShotTuning, count: u32, seed: u64) -> Vec<Vec2> {
    let (max_x, max_z) = court_limits(tuning);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Vec2::new(rng.gen_range(-max_x..=max_x), rng.gen_range(-max_z..=max_z)))
        .collect()
}

/// Spots for the configured mode
pub fn sweep_spots(config: &SweepConfig, tuning: &ShotTuning, seed: u64) -> Vec<Vec2> {
    match config.mode {
        SweepMode::Grid { spacing } => grid_spots(tuning, spacing),
        SweepMode::Random { samples } => random_spots(tuning, samples, seed),
    }
}

/// Shoot once from `spot` and follow the ball until the attempt resolves
pub fn simulate_shot(
    tuning: &ShotTuning,
    spot: Vec2,
    setting: PowerSetting,
) -> Result<ShotSample, ShotError> {
    let mut game = GameState::new(tuning.clone());
    game.place_ball(spot.x, spot.y);
    let launch = game.ball.position;

    let aim = game.aim();
    game.power = match setting {
        PowerSetting::Ideal => ShotPower::new(aim.ideal_power.round() as i32),
        PowerSetting::Fixed(power) => ShotPower::new(power as i32),
    };

    let mut bus = EventBus::disabled();
    game.handle_command(ShotCommand::Shoot, &mut bus)?;
    let (in_sweetspot, three_point) = game
        .attempt
        .map(|a| (a.power_in_sweetspot(), a.three_point))
        .unwrap_or_default();

    let start_frame = game.frame;
    let mut outcome = None;
    while outcome.is_none() && game.frame - start_frame < MAX_SHOT_FRAMES {
        outcome = game.tick(SWEEP_DT, &mut bus);
    }

    let points = match outcome {
        Some(ShotOutcome::Made { points, .. }) => points,
        _ => 0,
    };

    Ok(ShotSample {
        x: launch.x,
        z: launch.z,
        target: aim.basket,
        distance: aim.distance,
        setting,
        power: game.power.value(),
        in_sweetspot,
        three_point,
        made: points > 0,
        points,
        frames: game.frame - start_frame,
    })
}

/// Shoot from every spot once per power setting, in parallel.
/// Samples come back grouped by setting, spots in order within each group.
pub fn run_sweep(
    spots: &[Vec2],
    powers: &[PowerSetting],
    tuning: &ShotTuning,
) -> Result<Vec<ShotSample>, ShotError> {
    let jobs: Vec<(Vec2, PowerSetting)> = powers
        .iter()
        .flat_map(|setting| spots.iter().map(move |spot| (*spot, *setting)))
        .collect();

    jobs.par_iter()
        .map(|(spot, setting)| simulate_shot(tuning, *spot, *setting))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_centered_and_inside_court() {
        let tuning = ShotTuning::default();
        let spots = grid_spots(&tuning, 0.5);
        // floor(14.76 / 0.5) = 29 columns each way, floor(7.26 / 0.5) = 14 rows
        assert_eq!(spots.len(), 59 * 29);
        assert!(spots.contains(&Vec2::ZERO));
        assert!(spots.iter().all(|s| s.x.abs() <= 14.76 && s.y.abs() <= 7.26));
        assert!(grid_spots(&tuning, 0.0).is_empty());
    }

    #[test]
    fn test_random_spots_repeat_for_seed() {
        let tuning = ShotTuning::default();
        let a = random_spots(&tuning, 50, 42);
        let b = random_spots(&tuning, 50, 42);
        let c = random_spots(&tuning, 50, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|s| s.x.abs() <= 14.76 && s.y.abs() <= 7.26));
    }

    #[test]
    fn test_ideal_power_from_center_is_a_three() {
        let sample =
            simulate_shot(&ShotTuning::default(), Vec2::ZERO, PowerSetting::Ideal).unwrap();
        assert_eq!(sample.target, Basket::Left);
        assert_eq!(sample.power, 97);
        assert!(sample.in_sweetspot && sample.three_point);
        assert!(sample.made);
        assert_eq!(sample.points, 3);
    }

    #[test]
    fn test_zero_power_near_rim_misses() {
        let sample = simulate_shot(
            &ShotTuning::default(),
            Vec2::new(13.6, 0.0),
            PowerSetting::Fixed(0),
        )
        .unwrap();
        assert_eq!(sample.target, Basket::Right);
        assert!(!sample.made && !sample.in_sweetspot);
        assert_eq!(sample.points, 0);
        assert!(sample.frames < MAX_SHOT_FRAMES);
    }

    #[test]
    fn test_run_sweep_groups_by_power() {
        let tuning = ShotTuning::default();
        let spots = [Vec2::new(10.0, 0.0), Vec2::new(7.0, 0.0)];
        let samples = run_sweep(
            &spots,
            &[PowerSetting::Ideal, PowerSetting::Fixed(0)],
            &tuning,
        )
        .unwrap();
        assert_eq!(samples.len(), 4);
        assert!(samples[..2].iter().all(|s| s.setting == PowerSetting::Ideal && s.made));
        assert!(samples[2..].iter().all(|s| s.power == 0 && !s.made));
        assert_eq!(samples[1].x, 7.0);
    }

    #[test]
    fn test_broken_tuning_is_an_error() {
        let tuning = ShotTuning {
            ball_radius: 6.0,
            ..ShotTuning::default()
        };
        assert!(simulate_shot(&tuning, Vec2::ZERO, PowerSetting::Ideal).is_err());
    }
}
