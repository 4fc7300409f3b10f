//! Scripted scenarios for headless runs
//!
//! A scenario is a TOML file of timed actions, each optionally followed by
//! an assertion on the resulting state. The runner replays it against an
//! [`AppState`](crate::AppState) on a virtual clock.

mod runner;

pub use runner::{ActionFailure, ScenarioReport, ScenarioRunner, TICK};

use crate::state::{View, VoiceSpeed};
use crate::{Result, VisionError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A scenario loaded from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Scenario metadata
    pub scenario: ScenarioMetadata,
    /// Timed actions, ordered by time
    pub actions: Vec<ScenarioAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single action with timing
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioAction {
    /// Milliseconds after scenario start
    pub time_ms: u64,
    pub action: ActionType,
    /// Checked right after the action runs
    #[serde(default)]
    pub assert: Option<Assertion>,
}

impl ScenarioAction {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.time_ms)
    }
}

/// Things a scenario can do
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionType {
    /// Feed a transcript straight to the interpreter
    Say { text: String },
    /// Press the microphone and wait for the recognizer
    Listen,
    /// Keyboard shortcut such as "ctrl+h"
    Key { combo: String },
    SelectTab { view: View },
    OpenSettings,
    ToggleSound,
    SetVoiceSpeed { speed: VoiceSpeed },
    SetHighContrast { enabled: bool },
    SetSoundEnabled { enabled: bool },
    TestVoice,
    // Camera panel
    ScanEnvironment,
    DetectObjects,
    DescribeScene,
    RetryCamera,
    // Navigation panel
    StartNavigation { room: String },
    StopNavigation,
    // Map panel
    SelectRoom { room: String },
    WhereAmI,
    GetDirections,
    // Tasks panel
    ScanIngredients,
    SuggestRecipes,
    StartCooking { recipe: String },
    NextStep,
    RepeatStep,
    FindIngredient { name: String },
    /// Write a message to the log
    Log { message: String },
    /// Stop the scenario
    Exit {
        #[serde(default)]
        code: i32,
    },
}

/// Checks on the application state
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    ViewIs { view: View },
    /// Most recent utterance contains `text` (case-insensitive)
    LastSpokenContains { text: String },
    /// Any utterance so far contains `text` (case-insensitive)
    SpokeContains { text: String },
    DetectedCount { count: usize },
    IsListening,
    IsIdle,
    /// Navigation panel is at `step`
    NavigationStep { step: u32 },
    /// Camera panel error shown (or not)
    CameraError {
        #[serde(default = "default_true")]
        present: bool,
    },
    /// Tasks panel is on the 1-based recipe `step`
    RecipeStep { step: usize },
    EnvironmentMapped,
}

fn default_true() -> bool {
    true
}

impl Scenario {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Scenario =
            toml::from_str(content).map_err(|e| VisionError::ScenarioError(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VisionError::IOError(format!("failed to read scenario '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            VisionError::ScenarioError(msg) => {
                VisionError::ScenarioError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(VisionError::ScenarioError(
                "scenario must have at least one action".to_string(),
            ));
        }

        let mut last_time = 0;
        for action in &self.actions {
            if action.time_ms < last_time {
                return Err(VisionError::ScenarioError(format!(
                    "actions must be ordered by time; found {}ms after {}ms",
                    action.time_ms, last_time
                )));
            }
            last_time = action.time_ms;
        }

        if !self
            .actions
            .iter()
            .any(|a| matches!(a.action, ActionType::Exit { .. }))
        {
            return Err(VisionError::ScenarioError(
                "scenario must have an exit action".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions_and_assertions() {
        let scenario = Scenario::from_toml(
            r#"
            [scenario]
            name = "Kitchen walk"

            [[actions]]
            time_ms = 0
            action = { type = "select_tab", view = "navigation" }
            assert = { type = "view_is", view = "navigation" }

            [[actions]]
            time_ms = 100
            action = { type = "start_navigation", room = "kitchen" }

            [[actions]]
            time_ms = 4200
            action = { type = "log", message = "after four steps" }
            assert = { type = "navigation_step", step = 4 }

            [[actions]]
            time_ms = 5000
            action = { type = "set_voice_speed", speed = "slow" }

            [[actions]]
            time_ms = 6000
            action = { type = "exit" }
            "#,
        )
        .unwrap();

        assert_eq!(scenario.scenario.name, "Kitchen walk");
        assert!(scenario.scenario.description.is_empty());
        assert_eq!(scenario.actions.len(), 5);
        assert_eq!(
            scenario.actions[0].action,
            ActionType::SelectTab { view: View::Navigation }
        );
        assert_eq!(
            scenario.actions[2].assert,
            Some(Assertion::NavigationStep { step: 4 })
        );
        assert_eq!(
            scenario.actions[3].action,
            ActionType::SetVoiceSpeed { speed: VoiceSpeed::Slow }
        );
        assert_eq!(scenario.actions[4].action, ActionType::Exit { code: 0 });
        assert_eq!(scenario.actions[1].delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_camera_error_defaults_to_present() {
        let scenario = Scenario::from_toml(
            r#"
            [scenario]
            name = "Camera denied"

            [[actions]]
            time_ms = 0
            action = { type = "key", combo = "ctrl+c" }
            assert = { type = "camera_error" }

            [[actions]]
            time_ms = 10
            action = { type = "exit", code = 3 }
            "#,
        )
        .unwrap();
        assert_eq!(
            scenario.actions[0].assert,
            Some(Assertion::CameraError { present: true })
        );
        assert_eq!(scenario.actions[1].action, ActionType::Exit { code: 3 });
    }

    #[test]
    fn test_validation_errors() {
        let unordered = r#"
            [scenario]
            name = "bad"

            [[actions]]
            time_ms = 500
            action = { type = "listen" }

            [[actions]]
            time_ms = 100
            action = { type = "exit" }
        "#;
        let err = Scenario::from_toml(unordered).unwrap_err();
        assert!(err.to_string().contains("ordered by time"));

        let no_exit = r#"
            [scenario]
            name = "bad"

            [[actions]]
            time_ms = 0
            action = { type = "listen" }
        "#;
        let err = Scenario::from_toml(no_exit).unwrap_err();
        assert!(err.to_string().contains("exit action"));

        let unknown = r#"
            [scenario]
            name = "bad"

            [[actions]]
            time_ms = 0
            action = { type = "fly" }
        "#;
        assert!(matches!(
            Scenario::from_toml(unknown),
            Err(VisionError::ScenarioError(_))
        ));
    }
}
