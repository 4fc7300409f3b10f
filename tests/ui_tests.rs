//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests drive the real [`VisionApp`] through the accessibility tree:
//! clicks go through AccessKit actions and assertions read the resulting
//! [`AppState`](vision_assistant::AppState).

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use std::sync::Arc;
use vision_assistant::camera::SimulatedCamera;
use vision_assistant::ui::VisionApp;
use vision_assistant::{AppConfig, AppState, View};

fn app_with(config: AppConfig) -> VisionApp {
    VisionApp::with_state(AppState::from_config(&config.with_seed(7)))
}

fn harness(app: VisionApp) -> Harness<'static, VisionApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(1024.0, 1600.0))
        .build_state(|ctx, app: &mut VisionApp| app.show(ctx), app)
}

fn last_spoken(harness: &Harness<'_, VisionApp>) -> String {
    harness
        .state()
        .state()
        .speech
        .last_spoken()
        .unwrap_or_default()
        .to_string()
}

#[test]
fn test_shell_renders() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Vision Assistant");
    harness.get_by_label("Settings");
    harness.get_by_label("Disable sound");
    for tab in ["Home", "Environment", "Navigate", "Map", "Tasks"] {
        harness.get_by_label(tab);
    }
    harness.get_by_label("Start voice command");
    harness.get_by_label("Your Personal Vision Assistant");
    harness.get_by_label("Ready");
    harness.get_by_label("Ready for voice commands");
}

#[test]
fn test_tab_click_switches_view() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Map").click();
    harness.run();

    assert_eq!(harness.state().state().view(), View::Map);
    assert_eq!(last_spoken(&harness), "Map selected");
    harness.get_by_label("Interactive Environment Map");
    harness.get_by_label("Where Am I?").click();
    harness.run();

    assert!(last_spoken(&harness).starts_with("You are currently"));
}

#[test]
fn test_header_buttons() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Disable sound").click();
    harness.run();
    assert!(!harness.state().state().settings.sound_enabled);
    assert_eq!(last_spoken(&harness), "Sound disabled");

    harness.get_by_label("Enable sound").click();
    harness.run();
    assert!(harness.state().state().settings.sound_enabled);
    assert_eq!(last_spoken(&harness), "Sound enabled");

    harness.get_by_label("Settings").click();
    harness.run();
    assert_eq!(harness.state().state().view(), View::Settings);
    harness.get_by_label("Accessibility Settings");
    harness.get_by_label("Test Voice");
}

#[test]
fn test_mic_without_recognizer() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Start voice command").click();
    harness.run();

    assert_eq!(
        last_spoken(&harness),
        "Speech recognition not supported on this device"
    );
    assert!(!harness.state().state().listener.is_listening());
}

#[test]
fn test_high_contrast_toggle_swaps_theme() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Settings").click();
    harness.run();
    harness.get_by_label("High contrast disabled").click();
    harness.run();

    assert!(harness.state().state().settings.high_contrast);
    assert_eq!(harness.state().theme().bg_primary, egui::Color32::BLACK);
    harness.get_by_label("High contrast enabled");
}

#[test]
fn test_camera_denied_then_retry() {
    let camera = SimulatedCamera::new(false);
    let state = AppState::from_config(&AppConfig::default().with_seed(7))
        .with_camera(Arc::new(camera.clone()));
    let mut harness = harness(VisionApp::with_state(state));
    harness.run();

    harness.get_by_label("Environment").click();
    harness.run();

    harness.get_by_label("Unable to access camera. Please check permissions.");
    // Disabled while the camera is unavailable
    harness.get_by_label("Detect Objects").click();
    harness.run();
    assert!(harness.state().state().detected_objects.is_empty());

    camera.set_available(true);
    harness.get_by_label("Retry Camera Access").click();
    harness.run();

    assert_eq!(camera.open_streams(), 1);
    harness.get_by_label("Detect Objects").click();
    harness.run();

    let detected = harness.state().state().detected_objects.len();
    assert!((2..=4).contains(&detected));
    harness.get_by_label(&format!("{detected} objects detected"));
    harness.get_by_label(&format!("{detected} objects in view"));

    // Leaving the view releases the stream
    harness.get_by_label("Home").click();
    harness.run();
    assert_eq!(camera.open_streams(), 0);
}

#[test]
fn test_navigation_start_and_stop() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Navigate").click();
    harness.run();
    harness.get_by_label("Kitchen").click();
    harness.run();

    harness.get_by_label("Navigating to Kitchen");
    assert!(last_spoken(&harness).starts_with("Starting navigation to Kitchen."));

    harness.get_by_label("Stop Navigation").click();
    harness.run();

    assert_eq!(last_spoken(&harness), "Navigation stopped.");
    harness.get_by_label("Bathroom");
}

#[test]
fn test_cooking_flow() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Tasks").click();
    harness.run();
    harness.get_by_label("Kitchen Assistant");

    harness.get_by_label("eggs").click();
    harness.run();
    assert!(last_spoken(&harness).starts_with("eggs is located on the refrigerator"));

    harness
        .get_all_by_label("Start Cooking")
        .next()
        .expect("recipe card")
        .click();
    harness.run();

    harness.get_by_label("Step 1:");
    harness.get_by_label("Next Step").click();
    harness.run();
    harness.get_by_label("Step 2:");

    harness.get_by_label("Stop Cooking").click();
    harness.run();
    assert_eq!(last_spoken(&harness), "Cooking session ended.");
    harness.get_by_label("Suggested Recipes");
}

#[test]
fn test_voice_palette_speaks_phrase() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Emergency").click();
    harness.run();

    // Quick actions are spoken, not executed
    assert_eq!(last_spoken(&harness), "Emergency");
    assert_eq!(harness.state().state().view(), View::Home);
}

#[test]
fn test_keyboard_shortcuts() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.input_mut().modifiers = egui::Modifiers::CTRL;
    harness.input_mut().events.push(egui::Event::Copy);
    harness.run();
    assert_eq!(harness.state().state().view(), View::Camera);

    harness.input_mut().events.push(egui::Event::Key {
        key: egui::Key::H,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::CTRL,
    });
    harness.run();

    assert_eq!(harness.state().state().view(), View::Home);
    assert_eq!(last_spoken(&harness), "Home screen");
}

#[test]
fn test_copy_without_ctrl_is_ignored() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.input_mut().events.push(egui::Event::Copy);
    harness.run();

    assert_eq!(harness.state().state().view(), View::Home);
    assert_eq!(harness.state().state().speech.last_spoken(), None);
}

#[test]
fn test_navigation_tip_until_mapped() {
    let mut harness = harness(app_with(AppConfig::default()));
    harness.run();

    harness.get_by_label("Navigate").click();
    harness.run();
    harness.get_by_label("Tip: scan your environment first for more accurate guidance");

    harness.state_mut().state_mut().environment_mapped = true;
    harness.run();
    assert!(harness
        .query_by_label("Tip: scan your environment first for more accurate guidance")
        .is_none());
}
