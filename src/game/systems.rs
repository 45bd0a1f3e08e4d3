//! Bevy systems that drive GameState from keyboard input and frame time

use bevy::prelude::*;

use crate::events::{EventBus, GameEvent};
use crate::game::{CommandOutcome, GameState};
use crate::input::PlayerInput;
use crate::scoring::ShotOutcome;
use crate::tuning::ShotTuning;

/// Copy changed tuning (startup load or hot reload) into the game state
pub fn sync_tuning(
    tuning: Res<ShotTuning>,
    mut game: ResMut<GameState>,
    mut bus: ResMut<EventBus>,
) {
    if !tuning.is_changed() || game.tuning == *tuning {
        return;
    }
    game.set_tuning(tuning.clone());
    bus.emit(GameEvent::Config(tuning.clone()));
    debug!("Shot tuning applied to game state");
}

/// Apply queued commands in arrival order
pub fn apply_player_commands(
    mut input: ResMut<PlayerInput>,
    mut game: ResMut<GameState>,
    mut bus: ResMut<EventBus>,
) {
    for command in input.drain() {
        match game.handle_command(command, &mut bus) {
            Ok(CommandOutcome::Applied) => {}
            Ok(CommandOutcome::Ignored) => debug!("Ignored {:?}", command),
            Err(e) => warn!("Shot rejected: {}", e),
        }
    }
}

/// Step the ball by the frame's delta and log the resolved attempt, if any
pub fn step_ball(time: Res<Time>, mut game: ResMut<GameState>, mut bus: ResMut<EventBus>) {
    let Some(outcome) = game.tick(time.delta_secs(), &mut bus) else {
        return;
    };
    match outcome {
        ShotOutcome::Made {
            side,
            points,
            three_point,
        } => info!(
            "Made {} on the {} rim (+{}), {} now has {}",
            if three_point { "three" } else { "two" },
            side.name(),
            points,
            side.name(),
            game.score.side(side).points
        ),
        ShotOutcome::Missed => info!("Missed"),
    }
}
