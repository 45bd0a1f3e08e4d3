//! Input module - shot commands, PlayerInput resource and capture_input system

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a move command on the court plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the left hoop (-X)
    Left,
    /// Toward the right hoop (+X)
    Right,
    /// Away from the camera (-Z)
    Up,
    /// Toward the camera (+Z)
    Down,
}

impl Direction {
    /// World-space offset for one move of `step` units
    pub fn offset(self, step: f32) -> Vec3 {
        match self {
            Direction::Left => Vec3::new(-step, 0.0, 0.0),
            Direction::Right => Vec3::new(step, 0.0, 0.0),
            Direction::Up => Vec3::new(0.0, 0.0, -step),
            Direction::Down => Vec3::new(0.0, 0.0, step),
        }
    }
}

/// Discrete player command, applied in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotCommand {
    Move(Direction),
    PowerUp,
    PowerDown,
    Shoot,
    Reset,
}

impl ShotCommand {
    /// Parse the names used by scenario files ("shoot", "move_left", ...)
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "shoot" => ShotCommand::Shoot,
            "reset" => ShotCommand::Reset,
            "power_up" => ShotCommand::PowerUp,
            "power_down" => ShotCommand::PowerDown,
            "move_left" => ShotCommand::Move(Direction::Left),
            "move_right" => ShotCommand::Move(Direction::Right),
            "move_up" => ShotCommand::Move(Direction::Up),
            "move_down" => ShotCommand::Move(Direction::Down),
            _ => return None,
        })
    }
}

/// Commands captured this frame, waiting for the game step
#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pending: Vec<ShotCommand>,
}

impl PlayerInput {
    pub fn push(&mut self, command: ShotCommand) {
        self.pending.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take all queued commands, oldest first
    pub fn drain(&mut self) -> Vec<ShotCommand> {
        std::mem::take(&mut self.pending)
    }
}

/// Runs in Update before the game step and turns key presses into commands
pub fn capture_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let bindings = [
        (KeyCode::ArrowLeft, ShotCommand::Move(Direction::Left)),
        (KeyCode::ArrowRight, ShotCommand::Move(Direction::Right)),
        (KeyCode::ArrowUp, ShotCommand::Move(Direction::Up)),
        (KeyCode::ArrowDown, ShotCommand::Move(Direction::Down)),
        (KeyCode::KeyW, ShotCommand::PowerUp),
        (KeyCode::KeyS, ShotCommand::PowerDown),
        (KeyCode::Space, ShotCommand::Shoot),
        (KeyCode::KeyR, ShotCommand::Reset),
    ];

    for (key, command) in bindings {
        if keyboard.just_pressed(key) {
            input.push(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_names() {
        assert_eq!(ShotCommand::parse("shoot"), Some(ShotCommand::Shoot));
        assert_eq!(ShotCommand::parse(" Reset "), Some(ShotCommand::Reset));
        assert_eq!(
            ShotCommand::parse("move_down"),
            Some(ShotCommand::Move(Direction::Down))
        );
        assert_eq!(ShotCommand::parse("jump"), None);
    }

    #[test]
    fn test_drain_keeps_order_and_empties() {
        let mut input = PlayerInput::default();
        input.push(ShotCommand::PowerUp);
        input.push(ShotCommand::Shoot);
        assert_eq!(input.drain(), vec![ShotCommand::PowerUp, ShotCommand::Shoot]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(0.5), Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(Direction::Down.offset(0.5), Vec3::new(0.0, 0.0, 0.5));
    }
}
