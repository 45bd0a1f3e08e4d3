//! Scenario testing system for deterministic game testing
//!
//! Provides infrastructure for running scripted command tests against a
//! headless shot engine to verify physics, scoring and event order.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

use std::fs;
use std::path::{Path, PathBuf};

pub use assertions::{AssertionError, CapturedEvent, WorldState, check_never, check_sequence, check_state};
pub use input::ScriptedInputs;
pub use parser::{ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations, TestSetup, parse_test_file};
pub use runner::{TEST_DT, TestResult, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// All `.toml` scenarios under `base`, sorted. With a filter, only paths
/// (relative to `base`) containing it are kept.
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, tests: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_recursive(base, &path, filter, tests);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}
