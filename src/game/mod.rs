//! Game module - GameState controller and the plugin that runs it

mod state;
mod systems;

pub use state::*;
pub use systems::*;

use bevy::prelude::*;

use crate::events::{EventBus, update_event_bus_time};
use crate::input::{PlayerInput, capture_input};
use crate::tuning::{ShotTuning, load_shot_tuning_system};

/// Shot engine: tuning load, input capture and the per-frame step.
///
/// Input capture runs before the step in one chained set, so a key pressed
/// this frame is applied before the ball moves.
pub struct ShotEnginePlugin;

impl Plugin for ShotEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShotTuning>()
            .init_resource::<PlayerInput>()
            .init_resource::<GameState>()
            .insert_resource(EventBus::new())
            .add_systems(Startup, load_shot_tuning_system)
            .add_systems(
                Update,
                (
                    update_event_bus_time,
                    capture_input,
                    sync_tuning,
                    apply_player_commands,
                    step_ball,
                )
                    .chain(),
            );
    }
}
