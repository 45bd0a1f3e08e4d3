//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::input::ShotCommand;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Starting spot and power; unset values keep the game defaults
#[derive(Debug, Default, Deserialize)]
pub struct TestSetup {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
    pub power: Option<i32>,
}

/// Commands issued at a specific frame, applied in listed order
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    #[serde(default)]
    pub commands: Vec<String>,
}

impl FrameInput {
    /// Resolve command names, reporting the first unknown one
    pub fn parsed_commands(&self) -> Result<Vec<ShotCommand>, String> {
        self.commands
            .iter()
            .map(|name| {
                ShotCommand::parse(name)
                    .ok_or_else(|| format!("Unknown command '{}' at frame {}", name, self.frame))
            })
            .collect()
    }
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Event names that must not occur at all
    #[serde(default)]
    pub never: Vec<String>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    /// "left" or "right" for events that carry a side
    pub side: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}
