//! Config file auto-reload system
//!
//! Polls the shot tuning file every 2 seconds and reloads it when modified.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::constants::SHOT_TUNING_FILE;
use crate::tuning::{ShotTuning, load_shot_tuning_from_file};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks the modification time of the tuning file for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// File being watched
    pub path: String,
    /// Time since last check
    pub timer: f32,
    /// Last known modification time
    pub tuning_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::new(SHOT_TUNING_FILE)
    }
}

impl ConfigWatcher {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            timer: 0.0,
            tuning_mtime: get_mtime(path),
        }
    }

    /// Advance the poll timer by `dt`. When the interval elapses and the file
    /// changed, returns the reload result.
    pub fn poll(&mut self, dt: f32) -> Option<Result<ShotTuning, String>> {
        self.timer += dt;
        if self.timer < CHECK_INTERVAL {
            return None;
        }
        self.timer = 0.0;

        let mtime = get_mtime(&self.path);
        if mtime == self.tuning_mtime {
            return None;
        }
        self.tuning_mtime = mtime;
        Some(load_shot_tuning_from_file(&self.path))
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Check for tuning file changes and reload.
/// An invalid edit keeps the current tuning.
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut tuning: ResMut<ShotTuning>,
) {
    match watcher.poll(time.delta_secs()) {
        Some(Ok(reloaded)) => {
            *tuning = reloaded;
            info!("Auto-reloaded shot tuning from {}", watcher.path);
        }
        Some(Err(e)) => warn!("{}; keeping current tuning", e),
        None => {}
    }
}
