//! Application state management
//!
//! [`AppState`] is the view model shared by the egui front-end and the
//! scenario runner. It owns the current view, settings, speech adapters and
//! the mounted panel, and drives every timer from [`AppState::advance`].

use crate::camera::{CameraDevice, SimulatedCamera};
use crate::command::{interpret, Command, Shortcut};
use crate::config::AppConfig;
use crate::panels::{Panel, PanelContext};
use crate::sim::{Countdown, DetectedObject};
use crate::speech::{
    ListenOutcome, ListenStart, Priority, Recognizer, ScriptedRecognizer, SpeechInput,
    SpeechOutput, UnsupportedRecognizer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Spoken once shortly after start
pub const WELCOME_MESSAGE: &str = "Welcome to your Vision Assistant. I'm here to help you \
navigate and understand your environment. Say \"help\" to get started, or tap the microphone \
to give me a command.";

/// Top-level view; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Camera,
    Navigation,
    Map,
    Tasks,
    Settings,
}

impl View {
    /// Views reachable from the tab bar, in display order
    pub const TABS: [View; 5] = [View::Home, View::Camera, View::Navigation, View::Map, View::Tasks];

    pub fn id(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Camera => "camera",
            View::Navigation => "navigation",
            View::Map => "map",
            View::Tasks => "tasks",
            View::Settings => "settings",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Camera => "Environment",
            View::Navigation => "Navigate",
            View::Map => "Map",
            View::Tasks => "Tasks",
            View::Settings => "Settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(View::Home),
            "camera" | "environment" => Ok(View::Camera),
            "navigation" | "navigate" => Ok(View::Navigation),
            "map" => Ok(View::Map),
            "tasks" => Ok(View::Tasks),
            "settings" => Ok(View::Settings),
            other => Err(format!("unknown view '{other}'")),
        }
    }
}

/// Speech rate preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl VoiceSpeed {
    pub const ALL: [VoiceSpeed; 3] = [VoiceSpeed::Slow, VoiceSpeed::Normal, VoiceSpeed::Fast];

    /// Speech rate multiplier
    pub fn rate(&self) -> f32 {
        match self {
            VoiceSpeed::Slow => 0.5,
            VoiceSpeed::Normal => 1.0,
            VoiceSpeed::Fast => 2.0,
        }
    }

    /// Spoken name
    pub fn label(&self) -> &'static str {
        match self {
            VoiceSpeed::Slow => "slow",
            VoiceSpeed::Normal => "normal",
            VoiceSpeed::Fast => "fast",
        }
    }

    /// Control caption
    pub fn caption(&self) -> &'static str {
        match self {
            VoiceSpeed::Slow => "Slow (0.5x)",
            VoiceSpeed::Normal => "Normal (1x)",
            VoiceSpeed::Fast => "Fast (2x)",
        }
    }
}

/// Process-wide accessibility settings; not persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub high_contrast: bool,
    pub sound_enabled: bool,
    pub voice_speed: VoiceSpeed,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            sound_enabled: true,
            voice_speed: VoiceSpeed::Normal,
        }
    }
}

/// Central application state
pub struct AppState {
    /// Accessibility settings
    pub settings: Settings,

    /// Speech output adapter
    pub speech: SpeechOutput,

    /// Speech input adapter
    pub listener: SpeechInput,

    /// Last recognised transcript, lowercased
    pub last_command: Option<String>,

    /// Objects reported by the most recent detection
    pub detected_objects: Vec<DetectedObject>,

    /// Set once an environment scan completes
    pub environment_mapped: bool,

    panel: Panel,
    camera: Arc<dyn CameraDevice>,
    rng: StdRng,
    welcome: Countdown,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Simulated camera, no recognizer, entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_parts(
            Settings::default(),
            SpeechOutput::simulated(),
            SpeechInput::new(Box::new(UnsupportedRecognizer)),
            Arc::new(SimulatedCamera::default()),
            StdRng::from_entropy(),
            Duration::from_secs(1),
        )
    }

    /// Build state from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let recognizer: Box<dyn Recognizer> = if config.recognizer.transcripts.is_empty() {
            Box::new(UnsupportedRecognizer)
        } else {
            Box::new(
                ScriptedRecognizer::new(config.recognizer.transcripts.iter().cloned())
                    .with_latency(config.recognizer_latency()),
            )
        };

        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::with_parts(
            config.settings(),
            SpeechOutput::simulated(),
            SpeechInput::new(recognizer),
            Arc::new(SimulatedCamera::new(config.camera.available)),
            rng,
            config.welcome_delay(),
        )
    }

    /// Assemble state from explicit components
    pub fn with_parts(
        settings: Settings,
        mut speech: SpeechOutput,
        listener: SpeechInput,
        camera: Arc<dyn CameraDevice>,
        rng: StdRng,
        welcome_delay: Duration,
    ) -> Self {
        speech.set_sound_enabled(settings.sound_enabled);
        speech.set_rate(settings.voice_speed.rate());
        Self {
            settings,
            speech,
            listener,
            last_command: None,
            detected_objects: Vec::new(),
            environment_mapped: false,
            panel: Panel::Home,
            camera,
            rng,
            welcome: Countdown::new(welcome_delay),
        }
    }

    /// Replace the camera device; takes effect on the next mount
    pub fn with_camera(mut self, camera: Arc<dyn CameraDevice>) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn Recognizer>) -> Self {
        self.listener = SpeechInput::new(recognizer);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn view(&self) -> View {
        self.panel.view()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// The mounted panel together with the context it acts on
    pub fn panel_with_context(&mut self) -> (&mut Panel, PanelContext<'_>) {
        (
            &mut self.panel,
            PanelContext {
                speech: &mut self.speech,
                rng: &mut self.rng,
                detected: &mut self.detected_objects,
                environment_mapped: &mut self.environment_mapped,
            },
        )
    }

    /// Switch views, unmounting the old panel and mounting the new one
    pub fn set_view(&mut self, view: View) {
        if view == self.view() {
            return;
        }
        info!("View: {} -> {}", self.view(), view);
        // Release the old panel (and any camera stream) before mounting
        self.panel = Panel::Home;
        self.panel = Panel::mount(view, &self.camera, &mut self.speech);
    }

    /// Tab bar press
    pub fn select_tab(&mut self, view: View) {
        self.set_view(view);
        self.speech
            .speak(format!("{} selected", view.label()), Priority::Normal);
    }

    /// Header settings button
    pub fn open_settings(&mut self) {
        self.set_view(View::Settings);
    }

    /// Interpret a transcript, speak the response, then switch views
    pub fn handle_voice_command(&mut self, transcript: &str) -> Command {
        let command = interpret(transcript, &mut self.rng);
        debug!("Command: {:?}", command);
        self.speech.speak(command.response(), command.priority());
        if let Some(view) = command.target_view() {
            self.set_view(view);
        }
        command
    }

    /// Microphone control is enabled
    pub fn can_listen(&self) -> bool {
        !self.listener.is_listening() && !self.speech.is_speaking()
    }

    pub fn start_listening(&mut self) -> ListenStart {
        let start = self.listener.start();
        match start {
            ListenStart::Unsupported => self.speech.speak(
                "Speech recognition not supported on this device",
                Priority::High,
            ),
            ListenStart::Started => self.speech.speak("Listening...", Priority::Normal),
            ListenStart::AlreadyListening => {}
        }
        start
    }

    /// Apply a recognition outcome
    pub fn handle_listen_outcome(&mut self, outcome: ListenOutcome) {
        match outcome {
            ListenOutcome::Transcript(transcript) => {
                let transcript = transcript.to_lowercase();
                info!("Heard: {}", transcript);
                self.last_command = Some(transcript.clone());
                self.handle_voice_command(&transcript);
            }
            ListenOutcome::Failed(reason) => {
                debug!("Recognition failed: {}", reason);
                self.speech.speak(
                    "Sorry, I didn't catch that. Please try again.",
                    Priority::Normal,
                );
            }
        }
    }

    /// Check the recognizer for a finished activation
    pub fn poll_listener(&mut self) -> bool {
        match self.listener.poll() {
            Some(outcome) => {
                self.handle_listen_outcome(outcome);
                true
            }
            None => false,
        }
    }

    /// Block up to `timeout` for the active recognition to finish
    pub fn wait_for_listener(&mut self, timeout: Duration) -> bool {
        match self.listener.wait(timeout) {
            Some(outcome) => {
                self.handle_listen_outcome(outcome);
                true
            }
            None => false,
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Listen => {
                self.start_listening();
            }
            Shortcut::Home => {
                self.speech.speak("Home screen", Priority::Normal);
                self.set_view(View::Home);
            }
            Shortcut::Camera => {
                self.speech.speak("Camera view", Priority::Normal);
                self.set_view(View::Camera);
            }
        }
    }

    /// Header sound button
    pub fn toggle_sound(&mut self) {
        if self.settings.sound_enabled {
            self.speech.speak("Sound disabled", Priority::Normal);
            self.set_sound(false);
        } else {
            self.set_sound(true);
            self.speech.speak("Sound enabled", Priority::Normal);
        }
    }

    fn set_sound(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.speech.set_sound_enabled(enabled);
    }

    pub fn set_high_contrast(&mut self, enabled: bool) {
        self.settings.high_contrast = enabled;
        let text = if enabled {
            "High contrast mode enabled"
        } else {
            "High contrast mode disabled"
        };
        self.speech.speak(text, Priority::Normal);
    }

    pub fn set_voice_speed(&mut self, speed: VoiceSpeed) {
        self.settings.voice_speed = speed;
        self.speech.set_rate(speed.rate());
        self.speech
            .speak(format!("Voice speed set to {}", speed.label()), Priority::High);
    }

    /// Settings toggle; only enabling is announced
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.set_sound(enabled);
        if enabled {
            self.speech.speak("Sound enabled", Priority::Normal);
        }
    }

    pub fn test_voice(&mut self) {
        self.speech.speak(
            format!(
                "This is a test of the voice synthesis system. The voice speed is currently set to {}.",
                self.settings.voice_speed.label()
            ),
            Priority::Normal,
        );
    }

    /// Speak a palette phrase without executing it
    pub fn speak_phrase(&mut self, phrase: &str) {
        self.speech.speak(phrase, Priority::Normal);
    }

    /// Advance every timer by `dt`
    pub fn advance(&mut self, dt: Duration) {
        if self.welcome.advance(dt) {
            self.speech.speak(WELCOME_MESSAGE, Priority::Normal);
        }

        let (panel, mut ctx) = self.panel_with_context();
        panel.advance(dt, &mut ctx);

        self.poll_listener();
        self.speech.advance(dt);
    }

    /// Status bar caption
    pub fn status_text(&self) -> &'static str {
        if self.speech.is_speaking() {
            "Speaking..."
        } else {
            "Ready"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SimulatedCamera;

    fn state() -> AppState {
        AppState::from_config(&AppConfig::default().with_seed(11))
    }

    fn scripted(transcripts: &[&str]) -> AppState {
        AppState::from_config(
            &AppConfig::default()
                .with_seed(11)
                .with_transcripts(transcripts.iter().copied()),
        )
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.view(), View::Home);
        assert!(state.last_command.is_none());
        assert!(state.detected_objects.is_empty());
        assert!(!state.environment_mapped);
        assert!(state.can_listen());
        assert_eq!(state.status_text(), "Ready");
    }

    #[test]
    fn test_welcome_after_one_second() {
        let mut state = state();
        state.advance(Duration::from_millis(900));
        assert!(!state.speech.spoke("Welcome to your Vision Assistant"));
        state.advance(Duration::from_millis(100));
        assert_eq!(state.speech.last_spoken(), Some(WELCOME_MESSAGE));
    }

    #[test]
    fn test_response_precedes_mount_announcement() {
        let mut state = state();
        state.handle_voice_command("Scan my environment");
        assert_eq!(state.view(), View::Camera);

        let lines: Vec<&str> = state.speech.history().map(|u| u.text.as_str()).collect();
        assert_eq!(
            lines,
            vec![
                "Starting environment scan. Please slowly move your camera around the room.",
                "Camera activated. Point your device to scan the environment.",
            ]
        );
    }

    #[test]
    fn test_emergency_keeps_view() {
        let mut state = state();
        state.set_view(View::Map);
        let command = state.handle_voice_command("emergency");
        assert_eq!(command, Command::Emergency);
        assert_eq!(state.view(), View::Map);
        assert!(state.speech.is_speaking());
    }

    #[test]
    fn test_view_change_releases_camera() {
        let camera = SimulatedCamera::new(true);
        let mut state = state().with_camera(Arc::new(camera.clone()));

        state.set_view(View::Camera);
        assert_eq!(camera.open_streams(), 1);
        // Same view does not remount
        state.set_view(View::Camera);
        assert_eq!(camera.open_streams(), 1);

        state.set_view(View::Tasks);
        assert_eq!(camera.open_streams(), 0);
    }

    #[test]
    fn test_panel_state_resets_on_remount() {
        let mut state = state();
        state.set_view(View::Navigation);
        let (panel, ctx) = state.panel_with_context();
        panel.navigation_mut().unwrap().start("kitchen", ctx.speech);

        state.advance(Duration::from_secs(3));
        assert_eq!(state.panel().navigation().unwrap().current_step(), 3);

        state.set_view(View::Home);
        state.set_view(View::Navigation);
        assert_eq!(state.panel().navigation().unwrap().current_step(), 0);
    }

    #[test]
    fn test_select_tab_announces_label() {
        let mut state = state();
        state.select_tab(View::Camera);
        assert_eq!(state.view(), View::Camera);
        assert_eq!(state.speech.last_spoken(), Some("Environment selected"));
    }

    #[test]
    fn test_unsupported_recognizer() {
        let mut state = state();
        assert_eq!(state.start_listening(), ListenStart::Unsupported);
        assert!(!state.listener.is_listening());
        assert_eq!(
            state.speech.last_spoken(),
            Some("Speech recognition not supported on this device")
        );
    }

    #[test]
    fn test_listen_round_trip() {
        let mut state = scripted(&["Take me to the Kitchen"]);
        assert_eq!(state.start_listening(), ListenStart::Started);
        assert_eq!(state.speech.last_spoken(), Some("Listening..."));
        assert!(!state.can_listen());
        assert_eq!(state.start_listening(), ListenStart::AlreadyListening);

        assert!(state.wait_for_listener(Duration::from_secs(2)));
        assert_eq!(state.last_command.as_deref(), Some("take me to the kitchen"));
        assert_eq!(state.view(), View::Navigation);
        assert!(state
            .speech
            .spoke("Navigating to kitchen. Turn left and walk straight for 10 steps."));
        assert!(!state.listener.is_listening());
    }

    #[test]
    fn test_listen_failure() {
        let mut state = scripted(&["go home"]);
        state.start_listening();
        state.wait_for_listener(Duration::from_secs(2));

        // Script exhausted
        state.start_listening();
        assert!(state.wait_for_listener(Duration::from_secs(2)));
        assert_eq!(
            state.speech.last_spoken(),
            Some("Sorry, I didn't catch that. Please try again.")
        );
        assert_eq!(state.last_command.as_deref(), Some("go home"));
    }

    #[test]
    fn test_shortcuts() {
        let mut state = state();
        state.handle_shortcut(Shortcut::Camera);
        assert_eq!(state.view(), View::Camera);
        assert!(state.speech.spoke("Camera view"));

        state.handle_shortcut(Shortcut::Home);
        assert_eq!(state.view(), View::Home);
        assert_eq!(state.speech.last_spoken(), Some("Home screen"));
    }

    #[test]
    fn test_toggle_sound() {
        let mut state = state();
        state.toggle_sound();
        assert!(!state.settings.sound_enabled);
        assert_eq!(state.speech.last_spoken(), Some("Sound disabled"));
        // The announcement keeps playing after the mute
        assert!(state.speech.is_speaking());
        assert!(state.speech.poll_events().is_empty());

        state.handle_voice_command("go home");
        assert_eq!(state.speech.last_spoken(), Some("Sound disabled"));

        state.toggle_sound();
        assert!(state.settings.sound_enabled);
        assert_eq!(state.speech.last_spoken(), Some("Sound enabled"));
    }

    #[test]
    fn test_settings_switch_mute_keeps_current_utterance() {
        let mut state = state();
        state.test_voice();
        assert!(state.speech.is_speaking());

        state.set_sound_enabled(false);
        assert!(state.speech.is_speaking());
        assert!(state.speech.last_spoken().unwrap().starts_with("This is a test"));

        state.advance(Duration::from_secs(30));
        assert!(!state.speech.is_speaking());
    }

    #[test]
    fn test_settings_operations() {
        let mut state = state();

        state.set_voice_speed(VoiceSpeed::Fast);
        assert_eq!(state.speech.rate(), 2.0);
        assert_eq!(state.speech.last_spoken(), Some("Voice speed set to fast"));
        assert_eq!(state.speech.history().last().unwrap().rate, 2.0);

        state.test_voice();
        assert!(state
            .speech
            .last_spoken()
            .unwrap()
            .ends_with("The voice speed is currently set to fast."));

        state.set_high_contrast(true);
        assert!(state.settings.high_contrast);
        assert_eq!(state.speech.last_spoken(), Some("High contrast mode enabled"));

        state.set_sound_enabled(false);
        assert_eq!(state.speech.last_spoken(), Some("High contrast mode enabled"));
        state.set_sound_enabled(true);
        assert_eq!(state.speech.last_spoken(), Some("Sound enabled"));
    }

    #[test]
    fn test_view_parse() {
        assert_eq!("Environment".parse::<View>(), Ok(View::Camera));
        assert_eq!("navigate".parse::<View>(), Ok(View::Navigation));
        assert!("garage".parse::<View>().is_err());
        assert_eq!(View::TABS.len(), 5);
        assert_eq!(VoiceSpeed::Slow.rate(), 0.5);
    }
}
