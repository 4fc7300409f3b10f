//! Headless scenario runs
//!
//! Replays the bundled scenario files and a few inline scripts against a
//! seeded [`AppState`] on the virtual clock.

use std::path::PathBuf;
use vision_assistant::scenario::{Scenario, ScenarioReport, ScenarioRunner};
use vision_assistant::{AppConfig, AppState, View};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn run_file(name: &str) -> ScenarioReport {
    let scenario = Scenario::load(scenario_path(name)).unwrap();
    let mut state = AppState::from_config(&AppConfig::default().with_seed(11));
    ScenarioRunner::new(scenario).run(&mut state)
}

fn run_inline(toml: &str, config: AppConfig) -> (ScenarioReport, AppState) {
    let scenario = Scenario::from_toml(toml).unwrap();
    let mut state = AppState::from_config(&config.with_seed(3));
    let report = ScenarioRunner::new(scenario).run(&mut state);
    (report, state)
}

#[test]
fn test_kitchen_walk_scenario() {
    let report = run_file("kitchen_walk.toml");
    assert!(report.passed, "{:?}", report.failures);
    assert_eq!(report.assertions_checked, 4);
    assert!(report
        .spoken
        .iter()
        .any(|s| s == "Destination reached! You have arrived at the Kitchen."));
}

#[test]
fn test_environment_scan_scenario() {
    let report = run_file("environment_scan.toml");
    assert!(report.passed, "{:?}", report.failures);
    assert!(report.spoken.iter().any(|s| s == "Camera view"));
    assert!(report.spoken.iter().any(|s| s.starts_with("I can see: ")));
}

#[test]
fn test_cooking_scenario() {
    let report = run_file("cooking.toml");
    assert!(report.passed, "{:?}", report.failures);
    assert_eq!(report.process_exit_code(), 0);
}

#[test]
fn test_camera_denied_then_retry() {
    let (report, state) = run_inline(
        r#"
        [scenario]
        name = "camera_denied"

        [[actions]]
        time_ms = 0
        action = { type = "select_tab", view = "camera" }
        assert = { type = "camera_error" }

        [[actions]]
        time_ms = 100
        action = { type = "detect_objects" }

        [[actions]]
        time_ms = 200
        action = { type = "exit", code = 3 }
        "#,
        AppConfig::default().without_camera(),
    );

    // The disabled control is reported as a failure
    assert!(!report.passed);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reason, "detect control is disabled");
    assert_eq!(report.process_exit_code(), 3);
    assert!(report
        .spoken
        .iter()
        .any(|s| s == "Camera access failed. Please check your device permissions."));
    assert_eq!(state.view(), View::Camera);
    assert!(state.detected_objects.is_empty());
}

#[test]
fn test_scripted_recognizer_drives_commands() {
    let (report, state) = run_inline(
        r#"
        [scenario]
        name = "listen"

        [[actions]]
        time_ms = 1500
        action = { type = "listen" }
        assert = { type = "view_is", view = "settings" }

        [[actions]]
        time_ms = 1600
        action = { type = "listen" }
        assert = { type = "last_spoken_contains", text = "returned to home screen" }

        [[actions]]
        time_ms = 1700
        action = { type = "exit" }
        "#,
        AppConfig::default().with_transcripts(["Open Settings", "go home"]),
    );

    assert!(report.passed, "{:?}", report.failures);
    assert_eq!(state.view(), View::Home);
    assert_eq!(state.last_command.as_deref(), Some("go home"));
}

#[test]
fn test_muted_session_speaks_nothing() {
    let (report, _) = run_inline(
        r#"
        [scenario]
        name = "muted"

        [[actions]]
        time_ms = 1500
        action = { type = "say", text = "what's in front of me" }
        assert = { type = "view_is", view = "camera" }

        [[actions]]
        time_ms = 1600
        action = { type = "exit" }
        "#,
        AppConfig::default().without_sound(),
    );

    assert!(report.passed, "{:?}", report.failures);
    assert!(report.spoken.is_empty());
}

#[test]
fn test_missing_scenario_file() {
    let err = Scenario::load(scenario_path("does_not_exist.toml")).unwrap_err();
    assert!(err.to_string().contains("does_not_exist.toml"));
}
