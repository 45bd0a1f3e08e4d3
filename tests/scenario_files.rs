//! Runs every TOML scenario under tests/scenarios

use std::path::Path;

use hoopshot::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, parse_test_file, run_test};

#[test]
fn all_scenarios_pass() {
    let tests = discover_scenarios(Path::new(SCENARIOS_DIR), None);
    assert!(!tests.is_empty(), "no scenarios found in {}", SCENARIOS_DIR);

    let mut failures = Vec::new();
    for path in &tests {
        let result = match parse_test_file(path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };
        match result {
            TestResult::Pass { .. } => {}
            TestResult::Fail { error } => failures.push(format!("{}: {}", path.display(), error)),
            TestResult::Error { message } => {
                failures.push(format!("{}: {}", path.display(), message))
            }
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn category_filter_narrows_discovery() {
    let all = discover_scenarios(Path::new(SCENARIOS_DIR), None);
    let scoring = discover_scenarios(Path::new(SCENARIOS_DIR), Some("scoring"));
    assert!(!scoring.is_empty());
    assert!(scoring.len() < all.len());
    assert!(scoring.iter().all(|p| p.to_string_lossy().contains("scoring")));
}
