//! Hoopshot - shot-arc basketball practice built with Bevy
//!
//! Main entry point: app setup, HUD spawn and optional session logging.

use std::path::Path;

use bevy::prelude::*;
use hoopshot::events::{SqliteEventLogger, flush_events_to_sqlite, trace_bus_events};
use hoopshot::ui::{
    OutcomeText, PowerGaugeText, ScoreText, update_outcome_text, update_power_gauge,
    update_score_text,
};
use hoopshot::{
    ConfigWatcher, EventBus, GameState, ShotEnginePlugin, config_watcher, constants::*,
    tuning::load_shot_tuning_or_default,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let log_db = args.iter().any(|a| a == "--log-db");

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hoopshot".into(),
            resolution: bevy::window::WindowResolution::new(960, 540),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(ShotEnginePlugin)
    .insert_resource(ClearColor(BACKGROUND_COLOR))
    .init_resource::<ConfigWatcher>()
    .add_systems(Startup, (setup, start_session).chain())
    .add_systems(
        Update,
        (
            config_watcher::check_config_changes,
            quit_on_escape,
            (update_score_text, update_power_gauge, update_outcome_text),
            trace_bus_events,
            flush_events_to_sqlite,
        )
            .chain()
            .after(hoopshot::game::step_ball),
    )
    .add_systems(Last, finish_session_on_exit);

    if log_db {
        // Startup tuning load has not run yet; read the file for the session row
        let (tuning, _) = load_shot_tuning_or_default(SHOT_TUNING_FILE);
        match SqliteEventLogger::new(Path::new(EVENT_DB_FILE), "game", &tuning) {
            Ok(logger) => {
                info!(
                    "Logging session {} to {}",
                    logger.session_id(),
                    EVENT_DB_FILE
                );
                app.insert_resource(logger);
            }
            Err(e) => warn!("Event logging disabled: {}", e),
        }
    }

    app.run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
                ScoreText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
                PowerGaugeText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(TEXT_ACCENT),
                OutcomeText,
            ));
            parent.spawn((
                Text::new("Arrows: move | W/S: power | Space: shoot | R: reset | Esc: quit"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
        });
}

/// Open the logged session with its SessionStart event
fn start_session(logger: Option<Res<SqliteEventLogger>>, mut bus: ResMut<EventBus>) {
    if let Some(logger) = logger {
        bus.emit(logger.session_event());
    }
}

fn quit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

/// Store the final score on the session row when the app exits
fn finish_session_on_exit(
    mut exit: MessageReader<AppExit>,
    logger: Option<Res<SqliteEventLogger>>,
    game: Res<GameState>,
) {
    if exit.read().next().is_none() {
        return;
    }
    if let Some(logger) = logger {
        logger.finish_session(&game.score);
    }
}
