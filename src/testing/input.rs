//! Scripted input injection for tests

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::FrameInput;
use crate::input::ShotCommand;

/// Resource holding scripted commands for a test
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> commands issued that frame
    pub frames: HashMap<u64, Vec<ShotCommand>>,
    /// Current frame number
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Result<Self, String> {
        let mut frames: HashMap<u64, Vec<ShotCommand>> = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames
                .entry(fi.frame)
                .or_default()
                .extend(fi.parsed_commands()?);
        }

        Ok(Self {
            frames,
            current_frame: 0,
            max_frame,
        })
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Commands for the current frame, then advance to the next one
    pub fn advance_frame(&mut self) -> Vec<ShotCommand> {
        let commands = self.frames.remove(&self.current_frame).unwrap_or_default();
        self.current_frame += 1;
        commands
    }

    /// Check if simulation should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame <= self.max_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_delivered_on_their_frame() {
        let inputs = vec![
            FrameInput {
                frame: 2,
                commands: vec!["shoot".to_string()],
            },
            FrameInput {
                frame: 0,
                commands: vec!["power_down".to_string()],
            },
        ];
        let mut scripted = ScriptedInputs::from_inputs(&inputs).unwrap();
        assert_eq!(scripted.max_frame, 2);
        assert_eq!(scripted.advance_frame(), vec![ShotCommand::PowerDown]);
        assert!(scripted.advance_frame().is_empty());
        assert_eq!(scripted.advance_frame(), vec![ShotCommand::Shoot]);
        assert!(!scripted.should_continue());
    }
}
