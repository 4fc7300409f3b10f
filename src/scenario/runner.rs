//! Scenario runner
//!
//! Executes scenario actions at their scheduled virtual times, advancing the
//! application in fixed ticks between them.

use super::{ActionType, Assertion, Scenario};
use crate::command::Shortcut;
use crate::state::AppState;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// Virtual time step
pub const TICK: Duration = Duration::from_millis(50);

/// How long a `listen` action waits for the recognizer
pub const LISTEN_TIMEOUT: Duration = Duration::from_secs(5);

/// A failed action or assertion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionFailure {
    pub time_ms: u64,
    pub action: String,
    pub reason: String,
}

/// Outcome of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    /// Code requested by the exit action
    pub exit_code: i32,
    pub elapsed_ms: u64,
    pub actions_executed: usize,
    pub assertions_checked: usize,
    pub failures: Vec<ActionFailure>,
    /// Everything spoken during the run, in order
    pub spoken: Vec<String>,
}

impl ScenarioReport {
    /// Process exit code: the requested code, or 1 on failure
    pub fn process_exit_code(&self) -> i32 {
        if self.passed {
            self.exit_code
        } else if self.exit_code != 0 {
            self.exit_code
        } else {
            1
        }
    }

    pub fn summary(&self) -> String {
        let status = if self.passed { "PASSED" } else { "FAILED" };
        format!(
            "[SCENARIO] '{}' {}: {} actions, {} assertions, {} failures in {}ms",
            self.name,
            status,
            self.actions_executed,
            self.assertions_checked,
            self.failures.len(),
            self.elapsed_ms
        )
    }
}

/// Replays a [`Scenario`] against an [`AppState`]
pub struct ScenarioRunner {
    scenario: Scenario,
    clock: Duration,
    next_action: usize,
    assertions_checked: usize,
    failures: Vec<ActionFailure>,
    exit_code: Option<i32>,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Self {
        info!("[SCENARIO] Loaded: {}", scenario.scenario.name);
        if !scenario.scenario.description.is_empty() {
            info!("[SCENARIO] Description: {}", scenario.scenario.description);
        }
        info!("[SCENARIO] Total actions: {}", scenario.actions.len());

        Self {
            scenario,
            clock: Duration::ZERO,
            next_action: 0,
            assertions_checked: 0,
            failures: Vec::new(),
            exit_code: None,
        }
    }

    /// Virtual time elapsed
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Run to the exit action
    pub fn run(mut self, state: &mut AppState) -> ScenarioReport {
        state.speech.clear_history();

        loop {
            self.run_due_actions(state);
            if self.exit_code.is_some() || self.next_action >= self.scenario.actions.len() {
                break;
            }
            state.advance(TICK);
            self.clock += TICK;
        }

        let report = ScenarioReport {
            name: self.scenario.scenario.name.clone(),
            passed: self.failures.is_empty(),
            exit_code: self.exit_code.unwrap_or(0),
            elapsed_ms: self.clock.as_millis() as u64,
            actions_executed: self.next_action,
            assertions_checked: self.assertions_checked,
            failures: self.failures,
            spoken: state.speech.history().map(|u| u.text.clone()).collect(),
        };
        info!("{}", report.summary());
        report
    }

    fn run_due_actions(&mut self, state: &mut AppState) {
        while let Some(step) = self.scenario.actions.get(self.next_action) {
            if step.delay() > self.clock {
                return;
            }
            let step = step.clone();
            self.next_action += 1;
            debug!("[SCENARIO] {}ms: {:?}", step.time_ms, step.action);

            if let Err(reason) = self.execute(&step.action, state) {
                self.fail(step.time_ms, &step.action, reason);
            }

            if let Some(assertion) = &step.assert {
                self.assertions_checked += 1;
                match check(assertion, state) {
                    Ok(()) => info!("[SCENARIO] PASS: {:?}", assertion),
                    Err(reason) => self.fail(step.time_ms, &step.action, reason),
                }
            }

            if self.exit_code.is_some() {
                return;
            }
        }
    }

    fn fail(&mut self, time_ms: u64, action: &ActionType, reason: String) {
        error!("[SCENARIO] FAIL at {}ms: {:?} - {}", time_ms, action, reason);
        self.failures.push(ActionFailure {
            time_ms,
            action: format!("{action:?}"),
            reason,
        });
    }

    fn execute(&mut self, action: &ActionType, state: &mut AppState) -> Result<(), String> {
        match action {
            ActionType::Say { text } => {
                state.handle_voice_command(text);
            }
            ActionType::Listen => {
                state.start_listening();
                if state.listener.is_listening() && !state.wait_for_listener(LISTEN_TIMEOUT) {
                    return Err("recognizer did not finish in time".to_string());
                }
            }
            ActionType::Key { combo } => {
                let shortcut: Shortcut = combo.parse().map_err(|e| format!("{e}"))?;
                state.handle_shortcut(shortcut);
            }
            ActionType::SelectTab { view } => state.select_tab(*view),
            ActionType::OpenSettings => state.open_settings(),
            ActionType::ToggleSound => state.toggle_sound(),
            ActionType::SetVoiceSpeed { speed } => state.set_voice_speed(*speed),
            ActionType::SetHighContrast { enabled } => state.set_high_contrast(*enabled),
            ActionType::SetSoundEnabled { enabled } => state.set_sound_enabled(*enabled),
            ActionType::TestVoice => state.test_voice(),

            ActionType::ScanEnvironment => {
                let (panel, ctx) = state.panel_with_context();
                let camera = panel.camera_mut().ok_or("camera panel not mounted")?;
                if !camera.start_scan(ctx.speech) {
                    return Err("scan control is disabled".to_string());
                }
            }
            ActionType::DetectObjects => {
                let (panel, mut ctx) = state.panel_with_context();
                let camera = panel.camera_mut().ok_or("camera panel not mounted")?;
                if !camera.detect_objects(&mut ctx) {
                    return Err("detect control is disabled".to_string());
                }
            }
            ActionType::DescribeScene => {
                let (panel, ctx) = state.panel_with_context();
                let camera = panel.camera().ok_or("camera panel not mounted")?;
                if !camera.describe_scene(ctx.speech) {
                    return Err("describe control is disabled".to_string());
                }
            }
            ActionType::RetryCamera => {
                let (panel, ctx) = state.panel_with_context();
                let camera = panel.camera_mut().ok_or("camera panel not mounted")?;
                camera.retry(ctx.speech);
            }

            ActionType::StartNavigation { room } => {
                let (panel, ctx) = state.panel_with_context();
                let nav = panel.navigation_mut().ok_or("navigation panel not mounted")?;
                if !nav.start(room, ctx.speech) {
                    return Err(format!("unknown destination '{room}'"));
                }
            }
            ActionType::StopNavigation => {
                let (panel, ctx) = state.panel_with_context();
                let nav = panel.navigation_mut().ok_or("navigation panel not mounted")?;
                nav.stop(ctx.speech);
            }

            ActionType::SelectRoom { room } => {
                let (panel, ctx) = state.panel_with_context();
                let map = panel.map_mut().ok_or("map panel not mounted")?;
                if !map.select_room(room, ctx.speech) {
                    return Err(format!("unknown room '{room}'"));
                }
            }
            ActionType::WhereAmI => {
                let (panel, ctx) = state.panel_with_context();
                let map = panel.map().ok_or("map panel not mounted")?;
                map.where_am_i(ctx.speech);
            }
            ActionType::GetDirections => {
                let (panel, ctx) = state.panel_with_context();
                let map = panel.map().ok_or("map panel not mounted")?;
                if !map.get_directions(ctx.speech) {
                    return Err("no room selected".to_string());
                }
            }

            ActionType::ScanIngredients => {
                let (panel, ctx) = state.panel_with_context();
                let tasks = panel.tasks_mut().ok_or("tasks panel not mounted")?;
                tasks.scan_ingredients(ctx.speech);
            }
            ActionType::SuggestRecipes => {
                let (panel, ctx) = state.panel_with_context();
                let tasks = panel.tasks().ok_or("tasks panel not mounted")?;
                tasks.suggest_recipes(ctx.speech);
            }
            ActionType::StartCooking { recipe } => {
                let (panel, ctx) = state.panel_with_context();
                let tasks = panel.tasks_mut().ok_or("tasks panel not mounted")?;
                if !tasks.start_cooking(recipe, ctx.speech) {
                    return Err(format!("unknown recipe '{recipe}'"));
                }
            }
            ActionType::NextStep => {
                let (panel, ctx) = state.panel_with_context();
                let tasks = panel.tasks_mut().ok_or("tasks panel not mounted")?;
                tasks.next_step(ctx.speech);
            }
            ActionType::RepeatStep => {
                let (panel, ctx) = state.panel_with_context();
                let tasks = panel.tasks().ok_or("tasks panel not mounted")?;
                tasks.repeat_step(ctx.speech);
            }
            ActionType::FindIngredient { name } => {
                let (panel, ctx) = state.panel_with_context();
                let tasks = panel.tasks().ok_or("tasks panel not mounted")?;
                tasks.find_ingredient(name, ctx.speech);
            }

            ActionType::Log { message } => info!("[SCENARIO] Log: {}", message),
            ActionType::Exit { code } => {
                info!("[SCENARIO] Exit requested with code {}", code);
                self.exit_code = Some(*code);
            }
        }
        Ok(())
    }
}

fn expect(condition: bool, reason: impl FnOnce() -> String) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(reason())
    }
}

/// Check an assertion against the current state
pub fn check(assertion: &Assertion, state: &AppState) -> Result<(), String> {
    match assertion {
        Assertion::ViewIs { view } => expect(state.view() == *view, || {
            format!("expected view {}, got {}", view, state.view())
        }),
        Assertion::LastSpokenContains { text } => {
            let last = state.speech.last_spoken().unwrap_or_default();
            expect(last.to_lowercase().contains(&text.to_lowercase()), || {
                format!("last utterance {last:?} does not contain {text:?}")
            })
        }
        Assertion::SpokeContains { text } => {
            let needle = text.to_lowercase();
            expect(
                state
                    .speech
                    .history()
                    .any(|u| u.text.to_lowercase().contains(&needle)),
                || format!("nothing spoken contains {text:?}"),
            )
        }
        Assertion::DetectedCount { count } => {
            let actual = state.detected_objects.len();
            expect(actual == *count, || {
                format!("expected {count} detected objects, got {actual}")
            })
        }
        Assertion::IsListening => expect(state.listener.is_listening(), || {
            "expected listening state".to_string()
        }),
        Assertion::IsIdle => expect(state.listener.state().is_idle(), || {
            "expected idle state".to_string()
        }),
        Assertion::NavigationStep { step } => {
            let actual = state
                .panel()
                .navigation()
                .map(|nav| nav.current_step())
                .ok_or("navigation panel not mounted")?;
            expect(actual == *step, || {
                format!("expected navigation step {step}, got {actual}")
            })
        }
        Assertion::CameraError { present } => {
            let camera = state.panel().camera().ok_or("camera panel not mounted")?;
            let actual = camera.error().is_some();
            expect(actual == *present, || {
                format!("expected camera error present={present}, got {actual}")
            })
        }
        Assertion::RecipeStep { step } => {
            let tasks = state.panel().tasks().ok_or("tasks panel not mounted")?;
            let actual = tasks.current_step().map(|s| s + 1);
            expect(actual == Some(*step), || {
                format!("expected recipe step {step}, got {actual:?}")
            })
        }
        Assertion::EnvironmentMapped => expect(state.environment_mapped, || {
            "environment has not been mapped".to_string()
        }),
    }
}
