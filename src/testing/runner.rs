//! Test execution engine
//!
//! Runs a scenario in a headless Bevy app: scripted commands go through the
//! same `PlayerInput` queue and `apply_player_commands` system as the
//! interactive game, and the ball is stepped with a fixed 60 Hz delta.

use bevy::prelude::*;

use crate::events::EventBus;
use crate::game::{GameState, apply_player_commands};
use crate::input::PlayerInput;
use crate::shooting::ShotPower;

use super::assertions::{
    AssertionError, CapturedEvent, WorldState, check_never, check_sequence, check_state,
};
use super::input::ScriptedInputs;
use super::parser::TestDefinition;

/// Fixed step used by scenario runs (seconds)
pub const TEST_DT: f32 = 1.0 / 60.0;

/// Frames run when a scenario sets no input or state frames
const DEFAULT_FRAMES: u64 = 300;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Resource to track test state
#[derive(Resource)]
struct TestControl {
    should_exit: bool,
    current_frame: u64,
}

/// Resource to capture events during test
#[derive(Resource, Default)]
struct EventCapture {
    events: Vec<CapturedEvent>,
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let mut scripted_inputs = match ScriptedInputs::from_inputs(&test.input) {
        Ok(inputs) => inputs,
        Err(message) => return TestResult::Error { message },
    };

    // Run until the last state assertion
    for state in &test.expect.state {
        scripted_inputs.set_max_frame(state.after_frame);
    }
    if scripted_inputs.max_frame == 0 {
        scripted_inputs.max_frame = DEFAULT_FRAMES;
    }

    let mut game = GameState::default();
    game.place_ball(test.setup.x, test.setup.z);
    if let Some(power) = test.setup.power {
        game.power = ShotPower::new(power);
    }

    // Headless app: no plugins, Update driven by hand
    let mut app = App::new();
    app.insert_resource(game);
    app.insert_resource(EventBus::new());
    app.init_resource::<PlayerInput>();
    app.insert_resource(scripted_inputs);
    app.insert_resource(TestControl {
        should_exit: false,
        current_frame: 0,
    });
    app.init_resource::<EventCapture>();

    app.add_systems(
        Update,
        (
            input_injection,
            apply_player_commands,
            fixed_step,
            event_capture,
        )
            .chain(),
    );

    let mut state_checks = test.expect.state.clone();
    state_checks.sort_by_key(|s| s.after_frame);
    let mut next_check = 0;

    loop {
        app.update();

        let current_frame = app.world().resource::<TestControl>().current_frame;
        while next_check < state_checks.len() && current_frame >= state_checks[next_check].after_frame {
            let world_state = WorldState::from_game(app.world().resource::<GameState>());
            if let Err(error) = check_state(&state_checks[next_check], &world_state) {
                return TestResult::Fail { error };
            }
            next_check += 1;
        }

        if app.world().resource::<TestControl>().should_exit {
            break;
        }
    }

    let world = app.world();
    let final_frame = world.resource::<TestControl>().current_frame;
    let captured_events = &world.resource::<EventCapture>().events;

    if let Err(error) = check_sequence(&test.expect.sequence, captured_events) {
        return TestResult::Fail { error };
    }
    if let Err(error) = check_never(&test.expect.never, captured_events) {
        return TestResult::Fail { error };
    }

    TestResult::Pass {
        frames: final_frame,
    }
}

/// System to queue this frame's scripted commands
fn input_injection(
    mut scripted: ResMut<ScriptedInputs>,
    mut control: ResMut<TestControl>,
    mut input: ResMut<PlayerInput>,
) {
    control.current_frame = scripted.current_frame;

    if !scripted.should_continue() {
        control.should_exit = true;
        return;
    }

    for command in scripted.advance_frame() {
        input.push(command);
    }
}

/// Step the game by the fixed test delta
fn fixed_step(control: Res<TestControl>, mut game: ResMut<GameState>, mut bus: ResMut<EventBus>) {
    if control.should_exit {
        return;
    }
    game.tick(TEST_DT, &mut bus);
}

/// System to capture events, tagged with the frame they happened in
fn event_capture(
    control: Res<TestControl>,
    mut capture: ResMut<EventCapture>,
    mut bus: ResMut<EventBus>,
) {
    let frame = control.current_frame;
    for bus_event in bus.drain() {
        if let Some(captured) = CapturedEvent::from_game_event(frame, &bus_event.event) {
            capture.events.push(captured);
        }
    }
    bus.clear_processed();
}
