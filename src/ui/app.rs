//! Main application struct and eframe integration
//!
//! This module contains the main VisionApp that implements eframe::App.

use crate::command::Shortcut;
use crate::state::{AppState, View};
use crate::ui::components::{
    CameraView, EnvironmentMap, Header, HomeView, MicButton, NavTabs, NavigationView,
    SettingsPanel, StatusBar, TaskAssistant, VoicePalette,
};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, Key, TopBottomPanel};
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest frame gap fed to the timers
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Idle repaint interval so timers keep running without input
const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// Main Vision Assistant application
pub struct VisionApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Contrast mode the current theme was applied for
    applied_contrast: Option<bool>,
    /// Last frame time for timer deltas
    last_frame_time: Option<Instant>,
}

impl VisionApp {
    /// Create the application from eframe's creation context
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let mut app = Self::with_state(state);
        app.sync_theme(&cc.egui_ctx);
        app
    }

    /// Create without a creation context; the theme is applied on the first frame
    pub fn with_state(state: AppState) -> Self {
        Self {
            theme: Theme::for_contrast(state.settings.high_contrast),
            state,
            applied_contrast: None,
            last_frame_time: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap themes when the contrast setting changed
    fn sync_theme(&mut self, ctx: &egui::Context) {
        let high_contrast = self.state.settings.high_contrast;
        if self.applied_contrast == Some(high_contrast) {
            return;
        }
        debug!("Applying {} theme", if high_contrast { "high contrast" } else { "dark" });
        self.theme = Theme::for_contrast(high_contrast);
        self.theme.apply(ctx);
        self.applied_contrast = Some(high_contrast);
    }

    /// Ctrl+Space, Ctrl+H and Ctrl+C
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let shortcut = ctx.input(|i| {
            if !(i.modifiers.ctrl || i.modifiers.command) {
                return None;
            }
            // Ctrl+C usually arrives as a copy event rather than a key press
            if i.events.iter().any(|e| matches!(e, egui::Event::Copy)) {
                return Some(Shortcut::Camera);
            }
            if i.key_pressed(Key::Space) {
                Some(Shortcut::Listen)
            } else if i.key_pressed(Key::H) {
                Some(Shortcut::Home)
            } else if i.key_pressed(Key::C) {
                Some(Shortcut::Camera)
            } else {
                None
            }
        });

        if let Some(shortcut) = shortcut {
            debug!("Shortcut: {:?}", shortcut);
            self.state.handle_shortcut(shortcut);
        }
    }

    /// Advance timers by the wall-clock time since the previous frame
    fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).min(MAX_FRAME_DELTA);
            self.state.advance(dt);
        }
        self.last_frame_time = Some(now);
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                Header::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_voice_palette(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("voice_palette")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                VoicePalette::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    NavTabs::new(&mut self.state, &self.theme).show(ui);
                    ui.add_space(self.theme.spacing);

                    MicButton::new(&mut self.state, &self.theme).show(ui);
                    ui.add_space(self.theme.spacing);

                    self.theme.card().show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        self.show_view(ui);
                    });

                    ui.add_space(self.theme.spacing);
                    StatusBar::new(&self.state, &self.theme).show(ui);
                });
        });
    }

    fn show_view(&mut self, ui: &mut egui::Ui) {
        let theme = &self.theme;
        let state = &mut self.state;
        match state.view() {
            View::Home => HomeView::new(theme).show(ui),
            View::Camera => CameraView::new(state, theme).show(ui),
            View::Navigation => NavigationView::new(state, theme).show(ui),
            View::Map => EnvironmentMap::new(state, theme).show(ui),
            View::Tasks => TaskAssistant::new(state, theme).show(ui),
            View::Settings => SettingsPanel::new(state, theme).show(ui),
        }
    }

    /// Render one frame without advancing timers
    pub fn show(&mut self, ctx: &egui::Context) {
        self.sync_theme(ctx);
        self.handle_shortcuts(ctx);

        self.show_header(ctx);
        self.show_voice_palette(ctx);
        self.show_content(ctx);

        // Settings may have changed during this frame
        self.sync_theme(ctx);
    }
}

impl eframe::App for VisionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick();
        self.show(ctx);

        if self.state.listener.is_listening() || self.state.speech.is_speaking() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        debug!("Vision Assistant shutting down");
        self.state.speech.cancel();
    }
}
